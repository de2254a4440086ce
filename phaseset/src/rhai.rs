//! Compiles user-typed arithmetic expressions into fields using
//! [Rhai](https://rhai.rs)
//!
//! Expressions are written in terms of `x` and `y`, which are bound to the
//! horizontal `(x, z)` sampling coordinates; `z` is also defined (as zero), so
//! that expressions written for a 3D domain still compile.
//!
//! ```
//! let circle = phaseset::rhai::compile("x * x + y * y - 1")?;
//! assert_eq!(circle.eval(0.0, 0.0), -1.0);
//! assert_eq!(circle.eval(1.0, 1.0), 1.0);
//! # Ok::<(), phaseset::Error>(())
//! ```
use crate::{Error, ScalarField};
use rhai::{AST, Dynamic, Engine, FLOAT, Scope};
use std::sync::Arc;

/// Compiles an expression into a field
///
/// The expression is evaluated once at the origin; a runtime error or a
/// non-numeric result there rejects it.  Later runtime errors (at other
/// positions) produce `NaN`, which is only drawn when both sides of the field
/// are visible.
pub fn compile(expr: &str) -> Result<ScalarField, Error> {
    let mut engine = Engine::new();
    engine.set_max_expr_depths(64, 32);
    let ast = engine.compile_expression(expr)?;
    eval(&engine, &ast, 0.0, 0.0)?;

    let engine = Arc::new(engine);
    let ast = Arc::new(ast);
    Ok(ScalarField::new(move |x, z| {
        eval(&engine, &ast, x, z).unwrap_or(f32::NAN)
    }))
}

fn eval(engine: &Engine, ast: &AST, x: f32, z: f32) -> Result<f32, Error> {
    let mut scope = Scope::new();
    scope.push_constant("x", FLOAT::from(x));
    scope.push_constant("y", FLOAT::from(z));
    scope.push_constant("z", FLOAT::from(0.0f32));
    let out: Dynamic = engine.eval_ast_with_scope(&mut scope, ast)?;
    if let Ok(f) = out.as_float() {
        Ok(f as f32)
    } else if let Ok(i) = out.as_int() {
        Ok(i as f32)
    } else {
        Err(Error::NotANumber(out.type_name().to_owned()))
    }
}
