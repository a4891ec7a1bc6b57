use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::FunctionDef,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Pos, value::core::Value},
};

/// One lexical scope: a mapping from variable names to their values.
#[derive(Default)]
struct Scope {
    variables: HashMap<String, Value>,
}

/// The interpreter's name environment.
///
/// Variables live in a stack of scopes. A new scope is pushed for every
/// `if` body, `else` body, `from` iteration and function call. Function
/// calls additionally push a *barrier*: name lookup walks the scopes of the
/// active call from the innermost outward, then falls through to the global
/// scope, and never sees the caller's locals.
///
/// Functions live in a single global table that shares its namespace with
/// nothing but is checked against variable names: one name cannot denote
/// both.
pub struct Environment {
    scopes:    Vec<Scope>,
    barriers:  Vec<usize>,
    functions: HashMap<String, Rc<FunctionDef>>,
}

#[allow(clippy::new_without_default)]
impl Environment {
    /// Creates an environment holding only the empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:    vec![Scope::default()],
               barriers:  vec![0],
               functions: HashMap::new(), }
    }

    /// Index of the first scope visible to the active call.
    fn visibility_base(&self) -> usize {
        self.barriers.last().copied().unwrap_or(0)
    }

    /// Pushes a block scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pops the innermost scope.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Pushes a call frame: a visibility barrier plus the scope that will
    /// hold the parameters.
    pub fn push_call(&mut self) {
        self.barriers.push(self.scopes.len());
        self.scopes.push(Scope::default());
    }

    /// Pops a call frame, discarding every scope the call created. This
    /// also unwinds block scopes left behind by an early `return`.
    pub fn pop_call(&mut self) {
        if self.barriers.len() > 1
           && let Some(base) = self.barriers.pop()
        {
            self.scopes.truncate(base);
        }
    }

    /// Number of calls currently on the stack.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.barriers.len() - 1
    }

    /// Declares `name` in the innermost scope.
    ///
    /// # Errors
    /// - [`RuntimeError::VariableRedeclaration`] when the innermost scope
    ///   already binds `name`.
    /// - [`RuntimeError::NameCollision`] when a function of that name
    ///   exists.
    pub fn define(&mut self, name: &str, value: Value, pos: Pos) -> EvalResult<()> {
        if self.functions.contains_key(name) {
            return Err(RuntimeError::NameCollision { name: name.to_string(),
                                                     pos });
        }
        let Some(scope) = self.scopes.last_mut() else {
            unreachable!("the global scope is never popped")
        };
        if scope.variables.contains_key(name) {
            return Err(RuntimeError::VariableRedeclaration { name: name.to_string(),
                                                             pos });
        }
        scope.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// Looks `name` up in the visible scopes.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedVariable`] when no visible scope
    /// binds `name`.
    pub fn get(&self, name: &str, pos: Pos) -> EvalResult<&Value> {
        let base = self.visibility_base();
        for scope in self.scopes[base..].iter().rev() {
            if let Some(value) = scope.variables.get(name) {
                return Ok(value);
            }
        }
        if base > 0
           && let Some(value) = self.scopes[0].variables.get(name)
        {
            return Ok(value);
        }
        Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                              pos })
    }

    /// Overwrites the nearest visible binding of `name`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedVariable`] when no visible scope
    /// binds `name`.
    pub fn assign(&mut self, name: &str, value: Value, pos: Pos) -> EvalResult<()> {
        let base = self.visibility_base();
        for index in (base..self.scopes.len()).rev() {
            if self.scopes[index].variables.contains_key(name) {
                self.scopes[index].variables.insert(name.to_string(), value);
                return Ok(());
            }
        }
        if base > 0 && self.scopes[0].variables.contains_key(name) {
            self.scopes[0].variables.insert(name.to_string(), value);
            return Ok(());
        }
        Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                              pos })
    }

    /// Registers a function definition in the global table.
    ///
    /// # Errors
    /// - [`RuntimeError::FunctionRedefinition`] when the name is taken by a
    ///   function.
    /// - [`RuntimeError::NameCollision`] when the name is taken by a
    ///   visible variable.
    pub fn define_function(&mut self, def: &FunctionDef) -> EvalResult<()> {
        if self.functions.contains_key(&def.name) {
            return Err(RuntimeError::FunctionRedefinition { name: def.name.clone(),
                                                            pos:  def.pos, });
        }
        if self.get(&def.name, def.pos).is_ok() {
            return Err(RuntimeError::NameCollision { name: def.name.clone(),
                                                     pos:  def.pos, });
        }
        self.functions.insert(def.name.clone(), Rc::new(def.clone()));
        Ok(())
    }

    /// Resolves a function by name.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UndefinedFunction`] when no such function
    /// exists.
    pub fn function(&self, name: &str, pos: Pos) -> EvalResult<Rc<FunctionDef>> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                             pos })
    }
}
