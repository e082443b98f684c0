use std::rc::Rc;

use bs_core::{BlockSeqError, VarValue, Verdict};
use bs_runtime::{variable_action, verdict_action, VariableAction, VariableStore, VerdictAction};
use rhai::{Dynamic, Engine, ImmutableString, Scope, AST, FLOAT, INT};

pub(crate) struct ScriptHost {
    engine: Rc<Engine>,
    variables: Rc<Vec<String>>,
}

impl ScriptHost {
    pub(crate) fn new(variables: Vec<String>, max_operations: u64) -> Self {
        let mut engine = Engine::new();
        engine.set_strict_variables(true);
        engine.set_max_operations(max_operations);
        Self {
            engine: Rc::new(engine),
            variables: Rc::new(variables),
        }
    }

    pub(crate) fn start_action(
        &self,
        initials: Vec<(String, VarValue)>,
        snippet: Option<&str>,
    ) -> Result<VariableAction, BlockSeqError> {
        let ast = snippet
            .filter(|snippet| !snippet.trim().is_empty())
            .map(|snippet| self.compile(snippet, "start block"))
            .transpose()?;
        let engine = Rc::clone(&self.engine);
        let variables = Rc::clone(&self.variables);

        Ok(variable_action(move |store: &mut VariableStore| {
            for (name, value) in &initials {
                store.set(name.clone(), value.clone());
            }
            match &ast {
                Some(ast) => run(&engine, &variables, ast, store, "start block"),
                None => Ok(()),
            }
        }))
    }

    pub(crate) fn source_action(
        &self,
        snippet: &str,
        owner: String,
    ) -> Result<VariableAction, BlockSeqError> {
        let ast = self.compile(snippet, &owner)?;
        let engine = Rc::clone(&self.engine);
        let variables = Rc::clone(&self.variables);

        Ok(variable_action(move |store: &mut VariableStore| {
            run(&engine, &variables, &ast, store, &owner)
        }))
    }

    pub(crate) fn goal(&self, expression: &str) -> Result<VerdictAction, BlockSeqError> {
        let scope = self.declared_scope();
        let ast = self
            .engine
            .compile_expression_with_scope(&scope, expression)
            .map_err(|error| {
                BlockSeqError::new(
                    "LEVEL_GOAL_INVALID",
                    format!("Goal \"{}\" does not compile: {}", expression, error),
                )
            })?;
        let engine = Rc::clone(&self.engine);
        let variables = Rc::clone(&self.variables);

        Ok(verdict_action(move |store: &VariableStore| {
            let mut scope = scope_from_store(&variables, store);
            let value = engine
                .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
                .map_err(|error| {
                    BlockSeqError::new("ENGINE_EVAL_ERROR", format!("Goal eval failed: {}", error))
                })?;
            if !value.is::<bool>() {
                return Err(BlockSeqError::new(
                    "ENGINE_GOAL_NOT_BOOLEAN",
                    format!("Goal produced {} instead of a boolean.", value.type_name()),
                ));
            }
            Ok(if value.cast::<bool>() {
                Verdict::Success
            } else {
                Verdict::Failure
            })
        }))
    }

    fn compile(&self, snippet: &str, owner: &str) -> Result<AST, BlockSeqError> {
        let scope = self.declared_scope();
        self.engine
            .compile_with_scope(&scope, snippet)
            .map_err(|error| {
                BlockSeqError::new(
                    "LEVEL_ACTION_INVALID",
                    format!("Action of {} does not compile: {}", owner, error),
                )
            })
    }

    fn declared_scope(&self) -> Scope<'static> {
        let mut scope = Scope::new();
        for name in self.variables.iter() {
            scope.push_dynamic(name.clone(), Dynamic::UNIT);
        }
        scope
    }
}

fn run(
    engine: &Engine,
    variables: &[String],
    ast: &AST,
    store: &mut VariableStore,
    owner: &str,
) -> Result<(), BlockSeqError> {
    let mut scope = scope_from_store(variables, store);
    engine.run_ast_with_scope(&mut scope, ast).map_err(|error| {
        BlockSeqError::new(
            "ENGINE_EVAL_ERROR",
            format!("Action of {} failed: {}", owner, error),
        )
    })?;
    for name in variables {
        let after = scope
            .get_value::<Dynamic>(name)
            .map(dynamic_to_var)
            .transpose()?
            .unwrap_or_default();
        store.set(name.clone(), after);
    }
    Ok(())
}

fn scope_from_store(variables: &[String], store: &VariableStore) -> Scope<'static> {
    let mut scope = Scope::new();
    for name in variables {
        let value = store.get(name).map(var_to_dynamic).unwrap_or(Dynamic::UNIT);
        scope.push_dynamic(name.clone(), value);
    }
    scope
}

pub(crate) fn var_to_dynamic(value: &VarValue) -> Dynamic {
    match value {
        VarValue::Null => Dynamic::UNIT,
        VarValue::Bool(value) => Dynamic::from_bool(*value),
        VarValue::Int(value) => Dynamic::from_int(*value as INT),
        VarValue::Float(value) => Dynamic::from_float(*value as FLOAT),
        VarValue::Text(value) => Dynamic::from(value.clone()),
    }
}

pub(crate) fn dynamic_to_var(value: Dynamic) -> Result<VarValue, BlockSeqError> {
    if value.is_unit() {
        return Ok(VarValue::Null);
    }
    if value.is::<bool>() {
        return Ok(VarValue::Bool(value.cast::<bool>()));
    }
    if value.is::<INT>() {
        return Ok(VarValue::Int(value.cast::<INT>() as i64));
    }
    if value.is::<FLOAT>() {
        return Ok(VarValue::Float(value.cast::<FLOAT>() as f64));
    }
    if value.is::<ImmutableString>() {
        return Ok(VarValue::Text(value.cast::<ImmutableString>().to_string()));
    }
    Err(BlockSeqError::new(
        "ENGINE_VALUE_UNSUPPORTED",
        format!("Variables cannot hold rhai {} values.", value.type_name()),
    ))
}
