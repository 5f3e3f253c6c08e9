use std::collections::HashMap;

use tera::{Context, Tera, Value};

use crate::error::{Result, StencilError};

/// The text-substitution engine.
///
/// Wraps Tera so that helper registration is an explicit construction step on
/// every instance instead of hidden process-wide state. Each render uses a
/// throwaway `Tera` carrying only the one template being expanded.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Engine
    }

    /// Expand `text` against `context`. `name` identifies the template in
    /// engine errors; callers wrap the result with the file's full path.
    pub fn render(
        &self,
        name: &str,
        text: &str,
        context: &Context,
    ) -> std::result::Result<String, tera::Error> {
        let mut tera = Tera::default();
        self.register_helpers(&mut tera);
        tera.add_raw_template(name, text)?;
        tera.render(name, context)
    }

    /// Parse `text` without rendering it. Used by template validation.
    pub fn check_syntax(&self, name: &str, text: &str) -> std::result::Result<(), tera::Error> {
        let mut tera = Tera::default();
        self.register_helpers(&mut tera);
        tera.add_raw_template(name, text)?;
        Ok(())
    }

    fn register_helpers(&self, tera: &mut Tera) {
        tera.register_filter("json", json_filter);
    }
}

/// Serialize a context value to indented JSON text for embedding in templates.
fn json_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| tera::Error::msg(format!("json filter: {e}")))?;
    Ok(Value::String(text))
}

/// Build the shared expansion context from the caller's data object.
pub fn build_context(data: &Value) -> Result<Context> {
    Context::from_value(data.clone()).map_err(|e| StencilError::InvalidData { source: e })
}
