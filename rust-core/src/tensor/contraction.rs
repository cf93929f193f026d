//! Einstein-summation contractions over per-site tensor batches.
//!
//! An expression such as `"i,ijk,jk"` is parsed once into a [`Contraction`]:
//! the distinct index labels, the label slots of every operand, and which
//! labels stay free in the output. Evaluation broadcasts the contraction over
//! the site axis, so each site is contracted independently.
//!
//! Subscript rules follow numpy's `einsum`:
//! - operands are separated by `,`, whitespace is ignored;
//! - a label repeated anywhere on the left is summed over;
//! - without `->`, the output holds the labels that occur exactly once, in
//!   alphabetical order;
//! - with `->`, the listed labels form the output and every other label is summed.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ViewError};
use crate::tensor::tensor_field::{components_for_rank, TensorField, MAX_RANK};

/// Operand of a contraction.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// One tensor per site.
    Field(&'a TensorField),
    /// A single tensor shared by every site (e.g. the Levi-Civita symbol).
    Constant(&'a TensorField),
}

impl<'a> Operand<'a> {
    fn tensor(&self) -> &'a TensorField {
        match *self {
            Operand::Field(t) | Operand::Constant(t) => t,
        }
    }
}

/// A parsed contraction expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contraction {
    /// Distinct labels in order of first appearance; a label's position is its slot.
    labels: Vec<char>,
    /// Label slots of each operand's subscripts.
    operands: Vec<Vec<usize>>,
    /// Output label slots, in output order.
    free: Vec<usize>,
    /// Label slots summed over.
    summed: Vec<usize>,
}

fn contraction_error(expr: &str, message: impl fmt::Display) -> ViewError {
    ViewError::Contraction(format!("'{}': {}", expr, message))
}

fn check_label(expr: &str, c: char) -> Result<()> {
    if c.is_ascii_lowercase() {
        Ok(())
    } else {
        Err(contraction_error(expr, format!("unsupported index label '{}'", c)))
    }
}

impl Contraction {
    pub fn parse(expr: &str) -> Result<Self> {
        let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(contraction_error(expr, "empty expression"));
        }

        let (lhs, rhs) = match compact.split_once("->") {
            Some((lhs, rhs)) => {
                if rhs.contains("->") {
                    return Err(contraction_error(expr, "more than one '->'"));
                }
                (lhs, Some(rhs))
            }
            None => (compact.as_str(), None),
        };

        let mut labels: Vec<char> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut operands = Vec::new();
        for subscript in lhs.split(',') {
            if subscript.len() > MAX_RANK {
                return Err(contraction_error(
                    expr,
                    format!("operand '{}' has rank above {}", subscript, MAX_RANK),
                ));
            }
            let mut slots = Vec::with_capacity(subscript.len());
            for c in subscript.chars() {
                check_label(expr, c)?;
                let slot = match labels.iter().position(|&l| l == c) {
                    Some(slot) => slot,
                    None => {
                        labels.push(c);
                        counts.push(0);
                        labels.len() - 1
                    }
                };
                counts[slot] += 1;
                slots.push(slot);
            }
            operands.push(slots);
        }

        let free: Vec<usize> = match rhs {
            Some(output) => {
                let mut free = Vec::with_capacity(output.len());
                for c in output.chars() {
                    check_label(expr, c)?;
                    let slot = labels.iter().position(|&l| l == c).ok_or_else(|| {
                        contraction_error(expr, format!("output label '{}' not in any operand", c))
                    })?;
                    if free.contains(&slot) {
                        return Err(contraction_error(
                            expr,
                            format!("output label '{}' repeated", c),
                        ));
                    }
                    free.push(slot);
                }
                free
            }
            None => {
                let mut once: Vec<usize> = (0..labels.len()).filter(|&s| counts[s] == 1).collect();
                once.sort_by_key(|&s| labels[s]);
                once
            }
        };
        if free.len() > MAX_RANK {
            return Err(contraction_error(
                expr,
                format!("output rank {} exceeds {}", free.len(), MAX_RANK),
            ));
        }

        let summed = (0..labels.len()).filter(|s| !free.contains(s)).collect();

        Ok(Contraction {
            labels,
            operands,
            free,
            summed,
        })
    }

    /// Number of operands the expression expects.
    pub fn arity(&self) -> usize {
        self.operands.len()
    }

    pub fn output_rank(&self) -> usize {
        self.free.len()
    }

    /// Subscripts of each operand, e.g. `["ij", "ji"]`.
    pub fn operand_subscripts(&self) -> Vec<String> {
        self.operands
            .iter()
            .map(|slots| slots.iter().map(|&s| self.labels[s]).collect())
            .collect()
    }

    pub fn free_labels(&self) -> Vec<char> {
        self.free.iter().map(|&s| self.labels[s]).collect()
    }

    pub fn summed_labels(&self) -> Vec<char> {
        self.summed.iter().map(|&s| self.labels[s]).collect()
    }

    /// Evaluate the contraction independently at every site.
    pub fn evaluate(&self, operands: &[Operand<'_>]) -> Result<TensorField> {
        let expr = self.to_string();
        if operands.len() != self.arity() {
            return Err(contraction_error(
                &expr,
                format!("expected {} operands, got {}", self.arity(), operands.len()),
            ));
        }

        let mut sites: Option<usize> = None;
        for (n, (operand, slots)) in operands.iter().zip(&self.operands).enumerate() {
            let tensor = operand.tensor();
            if tensor.rank() != slots.len() {
                return Err(contraction_error(
                    &expr,
                    format!(
                        "operand {} has rank {}, subscript needs {}",
                        n,
                        tensor.rank(),
                        slots.len()
                    ),
                ));
            }
            match operand {
                Operand::Constant(t) if t.len() != 1 => {
                    return Err(contraction_error(
                        &expr,
                        format!("constant operand {} holds {} tensors, expected 1", n, t.len()),
                    ));
                }
                Operand::Constant(_) => {}
                Operand::Field(t) => match sites {
                    None => sites = Some(t.len()),
                    Some(count) if count != t.len() => {
                        return Err(ViewError::ShapeMismatch(format!(
                            "contraction '{}': operand {} has {} sites, expected {}",
                            expr,
                            n,
                            t.len(),
                            count
                        )));
                    }
                    Some(_) => {}
                },
            }
        }
        let sites = sites.ok_or_else(|| contraction_error(&expr, "no per-site operand"))?;

        let plan = self.plan();
        let stride = 1 + self.arity();
        let mut out = TensorField::zeros(self.output_rank(), sites);
        let mut views: Vec<&[f64]> = Vec::with_capacity(self.arity());
        for site in 0..sites {
            views.clear();
            for operand in operands {
                views.push(match operand {
                    Operand::Field(t) => t.site(site),
                    Operand::Constant(t) => t.site(0),
                });
            }
            let target = out.site_mut(site);
            for term in plan.chunks_exact(stride) {
                let product: f64 = views
                    .iter()
                    .zip(&term[1..])
                    .map(|(view, &offset)| view[offset])
                    .product();
                target[term[0]] += product;
            }
        }
        Ok(out)
    }

    // One entry per assignment of values to labels: output offset followed by
    // the offset into each operand.
    fn plan(&self) -> Vec<usize> {
        let n_labels = self.labels.len();
        let assignments = components_for_rank(n_labels);
        let mut plan = Vec::with_capacity(assignments * (1 + self.arity()));
        let mut values = vec![0usize; n_labels];
        for mut code in 0..assignments {
            for v in values.iter_mut() {
                *v = code % 3;
                code /= 3;
            }
            plan.push(flat_offset(&self.free, &values));
            for slots in &self.operands {
                plan.push(flat_offset(slots, &values));
            }
        }
        plan
    }
}

// Row-major offset of the component addressed by `slots` under `values`.
fn flat_offset(slots: &[usize], values: &[usize]) -> usize {
    slots.iter().fold(0, |acc, &s| acc * 3 + values[s])
}

impl FromStr for Contraction {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self> {
        Contraction::parse(s)
    }
}

impl fmt::Display for Contraction {
    /// Explicit form, e.g. `ij,ji->`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->", self.operand_subscripts().join(","))?;
        for label in self.free_labels() {
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}

/// Parse `expr` and evaluate it over `operands`.
pub fn contract(expr: &str, operands: &[Operand<'_>]) -> Result<TensorField> {
    Contraction::parse(expr)?.evaluate(operands)
}
