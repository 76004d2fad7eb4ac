//! # Data File Loaders
//!
//! Parsers for the comma-separated materials and recipe files.
//!
//! ```text
//! materials.txt          axe.txt
//! 1,Wood,5               Axe,0.75
//! 2,Iron,1,metal         1,5
//!                        2,1
//! ```
//!
//! Fields are trimmed; numbers parse culture-invariant (`.` decimal point).
//! Whitespace-only lines are ignored in both formats.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{CraftError, CraftResult};
use crate::inventory::Quantity;
use crate::material::{Material, MaterialId};

/// One parsed line of a materials file.
#[derive(Clone, Debug)]
pub struct MaterialRecord {
    /// The material described by the line.
    pub material: Material,
    /// Starting quantity to add to the inventory.
    pub quantity: Quantity,
}

/// A parsed recipe file, with material ids not yet resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeRecord {
    /// Trimmed recipe name.
    pub name: String,
    /// Success probability as written.
    pub success_rate: f64,
    /// `(material id, quantity)` pairs in file order.
    pub requirements: Vec<(MaterialId, Quantity)>,
}

pub(crate) fn read_file(path: &Path) -> CraftResult<String> {
    std::fs::read_to_string(path).map_err(|source| CraftError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a materials file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn read_materials(path: &Path) -> CraftResult<Vec<MaterialRecord>> {
    parse_materials(&read_file(path)?, path)
}

/// Reads and parses a single recipe file.
///
/// Returns `Ok(None)` for files with fewer than two non-blank lines.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn read_recipe(path: &Path) -> CraftResult<Option<RecipeRecord>> {
    parse_recipe(&read_file(path)?, path)
}

/// Parses `id,name,quantity[,type]` lines.
///
/// Lines with fewer than three fields are skipped.
///
/// # Errors
///
/// Returns [`CraftError::MalformedNumber`] for a bad id or quantity.
pub fn parse_materials(text: &str, path: &Path) -> CraftResult<Vec<MaterialRecord>> {
    let mut records = Vec::new();

    for (line_no, fields) in split_lines(text) {
        if fields.len() < 3 {
            warn!(path = %path.display(), line = line_no, "skipping short material line");
            continue;
        }

        let ctx = LineContext { path, line: line_no };
        let id = ctx.parse::<MaterialId>("material id", fields[0])?;
        let quantity = ctx.parse::<Quantity>("quantity", fields[2])?;
        let kind = fields.get(3).copied().unwrap_or("");

        records.push(MaterialRecord {
            material: Material::with_type(id, fields[1], kind),
            quantity,
        });
    }

    Ok(records)
}

/// Parses a recipe: a `name,successRate` header followed by
/// `materialId,quantity` lines.
///
/// # Errors
///
/// Returns [`CraftError::MissingField`] for lines lacking a comma and
/// [`CraftError::MalformedNumber`] for unparsable numbers.
pub fn parse_recipe(text: &str, path: &Path) -> CraftResult<Option<RecipeRecord>> {
    let lines: Vec<_> = split_lines(text).collect();
    if lines.len() < 2 {
        return Ok(None);
    }

    let (header_no, header) = &lines[0];
    let ctx = LineContext { path, line: *header_no };
    let name = header[0].to_string();
    let rate_field = ctx.field(header, 1, "success rate")?;
    let success_rate = ctx.parse::<f64>("success rate", rate_field)?;

    let mut requirements = Vec::with_capacity(lines.len() - 1);
    for (line_no, fields) in &lines[1..] {
        let ctx = LineContext { path, line: *line_no };
        let id = ctx.parse::<MaterialId>("material id", fields[0])?;
        let qty_field = ctx.field(fields, 1, "quantity")?;
        let quantity = ctx.parse::<Quantity>("quantity", qty_field)?;
        requirements.push((id, quantity));
    }

    Ok(Some(RecipeRecord {
        name,
        success_rate,
        requirements,
    }))
}

/// Yields `(1-based line number, trimmed fields)` for each non-blank line.
fn split_lines(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line.split(',').map(str::trim).collect()))
}

struct LineContext<'a> {
    path: &'a Path,
    line: usize,
}

impl LineContext<'_> {
    fn path(&self) -> PathBuf {
        self.path.to_path_buf()
    }

    fn field<'f>(&self, fields: &[&'f str], idx: usize, name: &'static str) -> CraftResult<&'f str> {
        fields.get(idx).copied().ok_or_else(|| CraftError::MissingField {
            path: self.path(),
            line: self.line,
            field: name,
        })
    }

    fn parse<T: std::str::FromStr>(&self, name: &'static str, value: &str) -> CraftResult<T> {
        value.parse().map_err(|_| CraftError::MalformedNumber {
            path: self.path(),
            line: self.line,
            field: name,
            value: value.to_string(),
        })
    }
}
