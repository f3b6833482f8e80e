//! Session symbol table mapping names to variables, constants, and macro
//! definitions.
//!
//! One table backs one evaluation session. There is no hidden global: the
//! parser, expander, and evaluator all borrow the table they are given, so
//! tests and concurrent sessions run isolated tables.

use std::collections::HashMap;

use thiserror::Error;

use crate::ast::Expr;
use crate::value::Value;

/// Attempt to define a name that is already bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("name {name:?} is already defined")]
pub struct RedefinitionError {
    pub name: String,
}

/// Lookup or rebind of a name with no binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("name {name:?} is not defined")]
pub struct NotFoundError {
    pub name: String,
}

/// A named, parameterized, reusable subexpression.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroDef {
    /// Parameter names, in call order.
    pub params: Vec<String>,
    /// Body tree; parameters appear as [`Expr::Variable`] nodes.
    pub body: Expr,
}

/// A binding held by the [`SymbolTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// Session value bound by the caller; may be rebound.
    Variable(Value),
    /// Seeded value from the constant pool.
    Constant(Value),
    /// Macro definition expanded before evaluation.
    Macro(MacroDef),
}

/// Seeded constant pool for [`SymbolTable::with_constants`].
const CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI)];

/// Mapping from name to [`Symbol`] for one evaluation session.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Symbol>,
}

impl SymbolTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-seeded with the constant pool (`pi`).
    #[must_use]
    pub fn with_constants() -> Self {
        let mut entries = HashMap::new();
        for (name, value) in CONSTANTS {
            entries.insert((*name).to_string(), Symbol::Constant(Value::Scalar(*value)));
        }
        Self { entries }
    }

    /// Bind `name` to `symbol`.
    ///
    /// # Errors
    /// Fails with [`RedefinitionError`] when the name is already taken,
    /// including by a seeded constant.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        symbol: Symbol,
    ) -> Result<(), RedefinitionError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(RedefinitionError { name });
        }
        self.entries.insert(name, symbol);
        Ok(())
    }

    /// Replace the binding of an existing name.
    ///
    /// # Errors
    /// Fails with [`NotFoundError`] when the name was never defined.
    pub fn rebind(&mut self, name: &str, symbol: Symbol) -> Result<(), NotFoundError> {
        let slot = self.entries.get_mut(name).ok_or_else(|| NotFoundError {
            name: name.to_string(),
        })?;
        *slot = symbol;
        Ok(())
    }

    /// Look up the binding for `name`.
    ///
    /// # Errors
    /// Fails with [`NotFoundError`] when the name has no binding.
    pub fn resolve(&self, name: &str) -> Result<&Symbol, NotFoundError> {
        self.entries.get(name).ok_or_else(|| NotFoundError {
            name: name.to_string(),
        })
    }

    /// Remove every binding, seeded constants included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
