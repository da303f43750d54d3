//! Lowering of a [`ModelSpec`] into a [`Model`].

use std::collections::BTreeSet;
use std::time::Instant;

use optiform_expr::{
    ComparisonSense, Expr, ExtractOptions, LinearExpression, LinearRelation, VariableId,
};

use crate::model::Model;
use crate::translate::config::TranslateConfig;
use crate::translate::diagnostics::{Diagnostic, DiagnosticKind, Location};
use crate::translate::error::TranslateError;
use crate::translate::spec::{ConstraintDecl, ModelSpec, ObjectiveDecl, VariableDecl};
use crate::types::{Bounds, Objective, Variable, VariableKind};

/// A translated model and everything noticed on the way.
#[derive(Debug, Clone)]
pub struct Translation {
    pub model: Model,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslateConfig,
}

impl Translator {
    pub fn new(config: TranslateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    /// Build a model from a description.
    ///
    /// Every declared variable gets a column. The objective and each
    /// constraint are parsed and each variable they mention gets the
    /// coefficient the extractor finds for it, with named parameters
    /// substituted. Constants move to the right-hand side.
    pub fn translate(&self, spec: &ModelSpec) -> Result<Translation, TranslateError> {
        let start = Instant::now();
        let mut lowering = Lowering {
            config: &self.config,
            options: self.config.extract_options(&spec.parameters),
            model: match &spec.name {
                Some(name) => Model::with_name(name.clone()),
                None => Model::new(),
            },
            diagnostics: Vec::new(),
            reserved: spec
                .constraints
                .iter()
                .filter_map(|decl| decl.name.clone())
                .collect(),
        };

        for decl in &spec.variables {
            lowering.declare(decl)?;
        }
        lowering.objective(&spec.objective)?;
        for (index, decl) in spec.constraints.iter().enumerate() {
            lowering.constraint(index, decl)?;
        }

        let Lowering {
            model, diagnostics, ..
        } = lowering;
        tracing::debug!(
            component = "translate",
            operation = "translate",
            status = "success",
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            diagnostics = diagnostics.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Translated model description"
        );
        Ok(Translation { model, diagnostics })
    }
}

struct Lowering<'a> {
    config: &'a TranslateConfig,
    options: ExtractOptions,
    model: Model,
    diagnostics: Vec<Diagnostic>,
    /// Explicit constraint names, kept away from generated ones.
    reserved: BTreeSet<String>,
}

impl Lowering<'_> {
    fn declare(&mut self, decl: &VariableDecl) -> Result<(), TranslateError> {
        let bounds = Bounds::new(
            decl.lower.unwrap_or_else(|| self.config.lower_bound()),
            decl.upper.unwrap_or(f64::INFINITY),
        );
        self.model
            .add_variable(decl.name.clone(), Variable::of_kind(decl.kind, bounds))?;
        Ok(())
    }

    fn objective(&mut self, decl: &ObjectiveDecl) -> Result<(), TranslateError> {
        let location = Location::Objective;
        let parsed = LinearExpression::parse(&decl.expression);
        let expr = self.lower(&location, &parsed)?;
        let (terms, constant) = expr.into_parts();
        self.model.set_objective(Objective {
            sense: Some(decl.sense),
            terms,
            constant,
        })?;
        self.model.set_objective_name(decl.name.clone());
        Ok(())
    }

    fn constraint(&mut self, index: usize, decl: &ConstraintDecl) -> Result<(), TranslateError> {
        let name = match &decl.name {
            Some(name) => name.clone(),
            None => self.generated_name(index),
        };
        let location = Location::Constraint(name.clone());

        let (lhs, sense, rhs) = match &decl.sense {
            Some(op) => {
                let sense = ComparisonSense::from_operator(op.trim()).ok_or_else(|| {
                    TranslateError::InvalidSense {
                        location: location.clone(),
                        value: op.clone(),
                    }
                })?;
                let rhs = decl
                    .rhs
                    .ok_or_else(|| TranslateError::MissingRhs {
                        location: location.clone(),
                    })?;
                let lhs = LinearExpression::parse(&decl.expression);
                let lhs = self.lower(&location, &lhs)?;
                (lhs, sense, Expr::from_constant(rhs))
            }
            None if decl.rhs.is_some() => return Err(TranslateError::MissingSense { location }),
            None => {
                let relation = LinearRelation::parse(&decl.expression).map_err(|source| {
                    TranslateError::Expression {
                        location: location.clone(),
                        source,
                    }
                })?;
                let (lhs, sense, rhs) = relation.into_parts();
                let lhs = self.lower(&location, &lhs)?;
                let rhs = self.lower_side(&location, &rhs)?;
                (lhs, sense, rhs)
            }
        };

        self.model
            .add_constraint_expr(Some(name), lhs.compare(sense, &rhs))?;
        Ok(())
    }

    /// `c<n>` for the constraint at `index`, moving past names already taken.
    fn generated_name(&self, index: usize) -> String {
        let mut n = index + 1;
        loop {
            let name = format!("c{n}");
            if !self.reserved.contains(&name) && self.model.constraint_id(&name).is_none() {
                return name;
            }
            n += 1;
        }
    }

    /// Lower one expression; an empty one is reported.
    fn lower(
        &mut self,
        location: &Location,
        parsed: &LinearExpression,
    ) -> Result<Expr, TranslateError> {
        if parsed.is_empty() && parsed.skipped().is_empty() {
            self.report(location, DiagnosticKind::EmptyExpression)?;
        }
        self.lower_side(location, parsed)
    }

    /// Lower one side of a relation; a side that is only a constant is fine.
    fn lower_side(
        &mut self,
        location: &Location,
        parsed: &LinearExpression,
    ) -> Result<Expr, TranslateError> {
        for term in parsed.skipped() {
            self.report(location, DiagnosticKind::MalformedTerm { term: term.clone() })?;
        }

        let mut expr = Expr::from_constant(parsed.constant());
        for name in parsed.variables() {
            let id = match self.model.variable_id(name) {
                Some(id) => id,
                None => self.declare_implicit(location, name)?,
            };

            let occurrences = parsed
                .terms()
                .iter()
                .filter(|term| term.variable() == Some(name))
                .count();
            if occurrences > 1 && !self.options.sums_duplicates() {
                self.report(
                    location,
                    DiagnosticKind::DuplicateTerm {
                        variable: name.to_string(),
                    },
                )?;
            }

            let resolution = parsed.coefficient(name, &self.options);
            let fallback = self.options.symbolic_fallback();
            if !resolution.is_resolved() {
                self.report(
                    location,
                    DiagnosticKind::UnresolvedCoefficient {
                        variable: name.to_string(),
                        symbols: resolution
                            .unresolved_symbols()
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                        fallback,
                    },
                )?;
            }
            expr.push_term(id, resolution.value(fallback));
        }
        Ok(expr)
    }

    fn declare_implicit(
        &mut self,
        location: &Location,
        name: &str,
    ) -> Result<VariableId, TranslateError> {
        if !self.config.declares_undeclared() {
            return Err(TranslateError::UndeclaredVariable {
                location: location.clone(),
                name: name.to_string(),
            });
        }
        self.report(
            location,
            DiagnosticKind::UndeclaredVariable {
                name: name.to_string(),
            },
        )?;
        let bounds = Bounds::new(self.config.lower_bound(), f64::INFINITY);
        let id = self
            .model
            .add_variable(name, Variable::of_kind(VariableKind::Continuous, bounds))?;
        Ok(id)
    }

    fn report(&mut self, location: &Location, kind: DiagnosticKind) -> Result<(), TranslateError> {
        let diagnostic = Diagnostic::new(location.clone(), kind);
        if self.config.is_strict() {
            return Err(diagnostic.into_error());
        }
        tracing::warn!(
            component = "translate",
            operation = "lower_expr",
            status = "diagnostic",
            code = diagnostic.code(),
            location = %diagnostic.location,
            "{diagnostic}"
        );
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}
