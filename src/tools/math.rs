//! Arithmetic tools: add, subtract, multiply, divide.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;

/// Arguments shared by all four arithmetic tools.
///
/// `deny_unknown_fields` makes a stray or misspelled field a validation
/// error instead of silently ignoring it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BinaryArgs {
    a: f64,
    b: f64,
}

fn parse_args(args: Value) -> anyhow::Result<BinaryArgs> {
    serde_json::from_value(args).map_err(|e| anyhow::anyhow!("Invalid arguments: {}", e))
}

/// Format a result without a trailing `.0` for integral values.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn number_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "a": { "type": "number", "description": "The first operand" },
            "b": { "type": "number", "description": "The second operand" }
        },
        "required": ["a", "b"]
    })
}

/// Add two numbers.
pub struct Add;

#[async_trait]
impl Tool for Add {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two numbers"
    }

    fn parameters_schema(&self) -> Value {
        number_schema()
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let BinaryArgs { a, b } = parse_args(args)?;
        Ok(format_number(a + b))
    }
}

/// Subtract the second number from the first.
pub struct Subtract;

#[async_trait]
impl Tool for Subtract {
    fn name(&self) -> &str {
        "subtract"
    }

    fn description(&self) -> &str {
        "Subtract the second number from the first"
    }

    fn parameters_schema(&self) -> Value {
        number_schema()
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let BinaryArgs { a, b } = parse_args(args)?;
        Ok(format_number(a - b))
    }
}

/// Multiply two numbers.
pub struct Multiply;

#[async_trait]
impl Tool for Multiply {
    fn name(&self) -> &str {
        "multiply"
    }

    fn description(&self) -> &str {
        "Multiply two numbers"
    }

    fn parameters_schema(&self) -> Value {
        number_schema()
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let BinaryArgs { a, b } = parse_args(args)?;
        Ok(format_number(a * b))
    }
}

/// Divide the first number by the second.
///
/// Division by zero is rejected with an error the model can read; it never
/// produces an infinity.
pub struct Divide;

#[async_trait]
impl Tool for Divide {
    fn name(&self) -> &str {
        "divide"
    }

    fn description(&self) -> &str {
        "Divide the first number by the second"
    }

    fn parameters_schema(&self) -> Value {
        number_schema()
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let BinaryArgs { a, b } = parse_args(args)?;
        if b == 0.0 {
            anyhow::bail!("division by zero");
        }
        Ok(format_number(a / b))
    }
}
