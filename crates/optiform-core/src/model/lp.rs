//! CPLEX-LP style text rendering.

use std::fmt::Write as _;

use optiform_expr::ids::VariableId;

use crate::model::Model;
use crate::types::{Bounds, Sense, Variable};

impl Model {
    /// Render the model in LP format for inspection or for solvers that read `.lp` files.
    ///
    /// Objective constants are written as a trailing constant term.
    pub fn to_lp_string(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.name {
            let _ = writeln!(out, "\\ {name}");
        }

        let heading = match self.objective.sense {
            Some(Sense::Maximize) => "Maximize",
            _ => "Minimize",
        };
        let _ = writeln!(out, "{heading}");
        let mut objective = self.render_terms(&self.objective.terms);
        if self.objective.constant != 0.0 {
            push_signed(&mut objective, self.objective.constant, None);
        }
        let objective_name = self.objective_name.as_deref().unwrap_or("obj");
        let _ = writeln!(out, " {objective_name}: {objective}");

        let _ = writeln!(out, "Subject To");
        for ((constraint, row), name) in self
            .constraints
            .iter()
            .zip(&self.rows)
            .zip(&self.constraint_names)
        {
            let lhs = self.render_terms(row);
            let Bounds { lower, upper } = constraint.bounds;
            let line = if lower == upper {
                format!("{lhs} = {}", fmt_num(upper))
            } else if lower.is_finite() && upper.is_finite() {
                format!("{} <= {lhs} <= {}", fmt_num(lower), fmt_num(upper))
            } else if upper.is_finite() {
                format!("{lhs} <= {}", fmt_num(upper))
            } else if lower.is_finite() {
                format!("{lhs} >= {}", fmt_num(lower))
            } else {
                format!("{lhs} >= -inf")
            };
            let _ = writeln!(out, " {name}: {line}");
        }

        let bounds: Vec<String> = self
            .variables()
            .filter_map(|(id, name)| {
                let var = &self.variables[id.index()];
                if var.is_binary() {
                    return None;
                }
                render_bound(name, var.bounds)
            })
            .collect();
        if !bounds.is_empty() {
            let _ = writeln!(out, "Bounds");
            for line in bounds {
                let _ = writeln!(out, " {line}");
            }
        }

        self.render_section(&mut out, "Generals", |var| var.is_integer && !var.is_binary());
        self.render_section(&mut out, "Binaries", |var| var.is_binary());

        out.push_str("End\n");
        out
    }

    fn render_terms(&self, terms: &[(VariableId, f64)]) -> String {
        let mut out = String::new();
        for (var_id, coeff) in terms {
            let name = self.variable_name(*var_id).unwrap_or("?");
            push_signed(&mut out, *coeff, Some(name));
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }

    fn render_section(
        &self,
        out: &mut String,
        heading: &str,
        include: impl Fn(&Variable) -> bool,
    ) {
        let names: Vec<&str> = self
            .variables()
            .filter(|(id, _)| include(&self.variables[id.index()]))
            .map(|(_, name)| name)
            .collect();
        if names.is_empty() {
            return;
        }
        let _ = writeln!(out, "{heading}");
        let _ = writeln!(out, " {}", names.join(" "));
    }
}

fn push_signed(out: &mut String, coeff: f64, name: Option<&str>) {
    let magnitude = coeff.abs();
    if out.is_empty() {
        if coeff < 0.0 {
            out.push_str("- ");
        }
    } else {
        out.push_str(if coeff < 0.0 { " - " } else { " + " });
    }
    match name {
        Some(name) if magnitude == 1.0 => out.push_str(name),
        Some(name) => {
            let _ = write!(out, "{} {name}", fmt_num(magnitude));
        }
        None => out.push_str(&fmt_num(magnitude)),
    }
}

fn render_bound(name: &str, bounds: Bounds) -> Option<String> {
    let Bounds { lower, upper } = bounds;
    match (lower.is_finite(), upper.is_finite()) {
        // LP default domain is [0, +inf).
        (true, false) if lower == 0.0 => None,
        (true, false) => Some(format!("{name} >= {}", fmt_num(lower))),
        (false, false) => Some(format!("{name} free")),
        (false, true) => Some(format!("-inf <= {name} <= {}", fmt_num(upper))),
        (true, true) if lower == upper => Some(format!("{name} = {}", fmt_num(lower))),
        (true, true) => Some(format!(
            "{} <= {name} <= {}",
            fmt_num(lower),
            fmt_num(upper)
        )),
    }
}

fn fmt_num(value: f64) -> String {
    format!("{value}")
}
