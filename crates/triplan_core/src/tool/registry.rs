//! In-process tool registry and dispatch.

use super::{
    AddToCalendarTool, BookFlightTool, BookHotelTool, FindActivitiesTool, Tool, ToolError,
    ToolResult, WebSearchTool,
};
use crate::service::itinerary_service::ItineraryService;
use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Name and usage hint of one registered tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

/// Name-keyed tool registry.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the travel mocks and `AddToCalendar`.
    pub fn travel_defaults() -> ToolResult<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(BookFlightTool))?;
        registry.register(Arc::new(BookHotelTool))?;
        registry.register(Arc::new(FindActivitiesTool))?;
        registry.register(Arc::new(WebSearchTool))?;
        registry.register(Arc::new(AddToCalendarTool))?;
        Ok(registry)
    }

    /// Registers one tool under its trimmed name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> ToolResult<()> {
        let name = tool.name().trim().to_string();
        if !is_valid_tool_name(&name) {
            return Err(ToolError::InvalidToolName(name));
        }
        if self.tools.contains_key(name.as_str()) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Returns sorted tool names.
    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name.trim()).cloned()
    }

    /// Returns name/description pairs for building an agent prompt.
    pub fn describe(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|(name, tool)| ToolDescriptor {
                name: name.clone(),
                description: tool.description().to_string(),
            })
            .collect()
    }

    /// Calls the tool registered as `name` with `input`.
    pub fn dispatch(
        &self,
        name: &str,
        input: &str,
        itinerary: &mut ItineraryService,
    ) -> ToolResult<String> {
        let Some(tool) = self.get(name) else {
            warn!(
                "event=tool_call module=tool status=error error_code=unknown_tool input_bytes={}",
                input.len()
            );
            return Err(ToolError::UnknownTool(name.trim().to_string()));
        };

        let started_at = Instant::now();
        let result = tool.call(input, itinerary);
        match &result {
            Ok(output) => info!(
                "event=tool_call module=tool status=ok tool={} input_bytes={} output_bytes={} duration_ms={}",
                tool.name(),
                input.len(),
                output.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=tool_call module=tool status=error tool={} input_bytes={} duration_ms={} error={}",
                tool.name(),
                input.len(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn is_valid_tool_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::is_valid_tool_name;

    #[test]
    fn tool_names_start_with_a_letter_and_have_no_spaces() {
        assert!(is_valid_tool_name("AddToCalendar"));
        assert!(is_valid_tool_name("web-search_2"));
        assert!(!is_valid_tool_name(""));
        assert!(!is_valid_tool_name("2fast"));
        assert!(!is_valid_tool_name("Add To Calendar"));
    }
}
