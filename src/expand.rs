//! Macro expansion over expression trees.
//!
//! [`Expander`] rewrites every [`Expr::MacroCall`] node away by
//! substituting the call's arguments into the macro's stored body and then
//! expanding whatever that produced. Expansion is purely structural; no
//! arithmetic happens here. A successfully expanded tree contains no macro
//! calls, so expanding it again returns an equal tree.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::ast::Expr;
use crate::symbols::{Symbol, SymbolTable};

/// Raised when a macro call cannot be rewritten away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    /// Expansion of a macro reached a call to a macro already being
    /// expanded, directly or through intermediaries.
    #[error("macro {name:?} expands through itself")]
    Cycle { name: String },
    /// A call supplied the wrong number of arguments.
    #[error("macro {name:?} takes {expected} arguments but {found} were given")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// A call named something that is not a defined macro.
    #[error("unknown macro {name:?}")]
    UnknownMacro { name: String },
    /// Expansion visited more nodes than the configured budget allows.
    #[error("expansion budget of {limit} nodes exhausted")]
    BudgetExhausted { limit: usize },
}

/// Rewrites macro calls into the bodies they name.
///
/// The expander carries the symbol table the macros live in, the chain of
/// macros currently being expanded (for cycle detection), and an optional
/// budget on visited nodes. The budget is shared across every call on the
/// same instance.
pub struct Expander<'a> {
    symbols: &'a SymbolTable,
    budget: Option<usize>,
    visited: usize,
    chain: Vec<String>,
}

impl<'a> Expander<'a> {
    #[must_use]
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            budget: None,
            visited: 0,
            chain: Vec::new(),
        }
    }

    /// Like [`Expander::new`] but giving up after `limit` visited nodes.
    #[must_use]
    pub fn with_budget(symbols: &'a SymbolTable, limit: usize) -> Self {
        Self {
            budget: Some(limit),
            ..Self::new(symbols)
        }
    }

    /// Rebuild `expr` with every macro call replaced by its expansion.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpansionError`] when a call names an unknown macro,
    /// supplies the wrong number of arguments, recurses, or exceeds the
    /// node budget.
    pub fn expand(&mut self, expr: &Expr) -> Result<Expr, ExpansionError> {
        self.charge()?;
        match expr {
            Expr::Literal(_) | Expr::Variable(_) => Ok(expr.clone()),
            Expr::Unary { op, operand } => Ok(Expr::Unary {
                op: *op,
                operand: Box::new(self.expand(operand)?),
            }),
            Expr::Binary { op, lhs, rhs } => Ok(Expr::Binary {
                op: *op,
                lhs: Box::new(self.expand(lhs)?),
                rhs: Box::new(self.expand(rhs)?),
            }),
            Expr::Quantifier {
                kind,
                var,
                domain,
                predicate,
            } => Ok(Expr::Quantifier {
                kind: *kind,
                var: var.clone(),
                domain: Box::new(self.expand(domain)?),
                predicate: Box::new(self.expand(predicate)?),
            }),
            Expr::List(items) => {
                let items = items
                    .iter()
                    .map(|item| self.expand(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::List(items))
            }
            Expr::MacroCall { name, args } => self.expand_call(name, args),
        }
    }

    fn expand_call(&mut self, name: &str, args: &[Expr]) -> Result<Expr, ExpansionError> {
        if self.chain.iter().any(|active| active == name) {
            return Err(ExpansionError::Cycle {
                name: name.to_string(),
            });
        }
        let Ok(Symbol::Macro(def)) = self.symbols.resolve(name) else {
            return Err(ExpansionError::UnknownMacro {
                name: name.to_string(),
            });
        };
        if def.params.len() != args.len() {
            return Err(ExpansionError::ArityMismatch {
                name: name.to_string(),
                expected: def.params.len(),
                found: args.len(),
            });
        }
        debug!("expanding macro {name} with {} arguments", args.len());
        let mut bindings = HashMap::new();
        for (param, arg) in def.params.iter().zip(args) {
            bindings.insert(param.clone(), self.expand(arg)?);
        }
        let body = substitute(&def.body, &bindings);
        self.chain.push(name.to_string());
        let result = self.expand(&body);
        self.chain.pop();
        result
    }

    fn charge(&mut self) -> Result<(), ExpansionError> {
        self.visited += 1;
        if let Some(limit) = self.budget
            && self.visited > limit
        {
            return Err(ExpansionError::BudgetExhausted { limit });
        }
        Ok(())
    }
}

/// Replace parameter references in `body` with the bound expressions.
///
/// A quantifier whose bound variable has the same name as a parameter
/// shadows that parameter inside its predicate; the domain is substituted
/// normally.
fn substitute(body: &Expr, bindings: &HashMap<String, Expr>) -> Expr {
    match body {
        Expr::Literal(n) => Expr::Literal(*n),
        Expr::Variable(name) => bindings
            .get(name)
            .cloned()
            .unwrap_or_else(|| Expr::Variable(name.clone())),
        Expr::Unary { op, operand } => Expr::Unary {
            op: *op,
            operand: Box::new(substitute(operand, bindings)),
        },
        Expr::Binary { op, lhs, rhs } => Expr::Binary {
            op: *op,
            lhs: Box::new(substitute(lhs, bindings)),
            rhs: Box::new(substitute(rhs, bindings)),
        },
        Expr::MacroCall { name, args } => Expr::MacroCall {
            name: name.clone(),
            args: args.iter().map(|arg| substitute(arg, bindings)).collect(),
        },
        Expr::Quantifier {
            kind,
            var,
            domain,
            predicate,
        } => {
            let domain = substitute(domain, bindings);
            let predicate = if bindings.contains_key(var) {
                let mut inner = bindings.clone();
                inner.remove(var);
                substitute(predicate, &inner)
            } else {
                substitute(predicate, bindings)
            };
            Expr::Quantifier {
                kind: *kind,
                var: var.clone(),
                domain: Box::new(domain),
                predicate: Box::new(predicate),
            }
        }
        Expr::List(items) => Expr::List(items.iter().map(|item| substitute(item, bindings)).collect()),
    }
}

/// Expand `expr` with a fresh, unlimited [`Expander`].
///
/// # Errors
///
/// Returns an [`ExpansionError`] when a call names an unknown macro,
/// supplies the wrong number of arguments, or recurses.
pub fn expand(expr: &Expr, symbols: &SymbolTable) -> Result<Expr, ExpansionError> {
    Expander::new(symbols).expand(expr)
}
