//! Typed tool registry.
//!
//! Maps tool names to handlers and derives the catalog sent to the model
//! from the same source, so the two cannot drift apart.

use std::collections::HashMap;
use std::sync::Arc;

use super::tool::Tool;
use crate::error::{ItineraError, Result};
use crate::provider::ToolDefinition;

/// A validated set of tools available to one agent.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    // catalog order follows registration order
    order: Vec<String>,
}

impl ToolRegistry {
    /// Build a registry, rejecting duplicate or empty tool names.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self> {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for tool in tools {
            let name = tool.name().to_string();
            if name.is_empty() {
                return Err(ItineraError::InvalidState("tool with empty name".into()));
            }
            if map.insert(name.clone(), tool).is_some() {
                return Err(ItineraError::InvalidState(format!(
                    "duplicate tool name: {name}"
                )));
            }
            order.push(name);
        }
        Ok(Self { tools: map, order })
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The catalog advertised to the model.
    pub fn catalog(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect()
    }
}
