//! Plain-text dump of a built model, in the LP file format the external
//! solver family understands. Audit artifact only; nothing in this crate
//! parses it back.

use chrono::{SecondsFormat, Utc};
use itertools::Itertools;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::PlanError;
use crate::model::{FlowModel, LinearExpr};

/// Write the model declaration to `path`, overwriting any previous dump.
pub fn write_model(model: &FlowModel, path: &Path) -> Result<(), PlanError> {
    fs::write(path, render_model(model))?;
    Ok(())
}

fn render_model(model: &FlowModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\\ supply-flow-planner model '{}'", model.name);
    let _ = writeln!(
        out,
        "\\ generated {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let mut objectives = model.objectives.iter();
    let _ = writeln!(out, "Minimize");
    if let Some(primary) = objectives.next() {
        let _ = writeln!(out, " {}: {}", primary.name, render_expr(&primary.expr));
    }
    // The format has no native multi-objective section; lower-priority
    // objectives are recorded as comments.
    for objective in objectives {
        let _ = writeln!(
            out,
            "\\ lexicographic objective, priority {}",
            objective.priority
        );
        let _ = writeln!(out, "\\ {}: {}", objective.name, render_expr(&objective.expr));
    }

    let _ = writeln!(out, "Subject To");
    for c in &model.constraints {
        let _ = writeln!(
            out,
            " {}: {} {} {}",
            c.name,
            render_expr(&c.lhs),
            c.relation,
            render_number(c.rhs)
        );
    }

    let _ = writeln!(out, "Bounds");
    for arc in &model.arcs {
        let _ = writeln!(out, " 0 <= {}", arc.var_name());
    }
    let _ = writeln!(out, "End");

    out
}

fn render_expr(expr: &LinearExpr) -> String {
    expr.terms()
        .enumerate()
        .map(|(i, (arc, coefficient))| {
            let term = render_term(coefficient.abs(), &arc.var_name());
            match (i, coefficient < 0.0) {
                (0, false) => term,
                (0, true) => format!("- {term}"),
                (_, false) => format!("+ {term}"),
                (_, true) => format!("- {term}"),
            }
        })
        .join(" ")
}

fn render_term(magnitude: f64, name: &str) -> String {
    if (magnitude - 1.0).abs() < f64::EPSILON {
        name.to_string()
    } else {
        format!("{} {}", render_number(magnitude), name)
    }
}

fn render_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
