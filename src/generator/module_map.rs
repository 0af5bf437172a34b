//! Clang module map for framework targets.

use super::Generator;

/// `framework module` declaration exporting an umbrella header.
#[derive(Debug, Clone)]
pub struct ModuleMap {
    module_name: String,
    umbrella_header: String,
}

impl ModuleMap {
    pub fn new(module_name: impl Into<String>, umbrella_header: impl Into<String>) -> Self {
        ModuleMap {
            module_name: module_name.into(),
            umbrella_header: umbrella_header.into(),
        }
    }
}

impl Generator for ModuleMap {
    fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("framework module {} {{\n", self.module_name));
        output.push_str(&format!("  umbrella header \"{}\"\n", self.umbrella_header));
        output.push('\n');
        output.push_str("  export *\n");
        output.push_str("  module * { export * }\n");
        output.push_str("}\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_map_contents() {
        let map = ModuleMap::new("Banana_Kit", "Banana-Kit-umbrella.h");
        assert_eq!(
            map.generate(),
            "framework module Banana_Kit {\n  umbrella header \"Banana-Kit-umbrella.h\"\n\n  export *\n  module * { export * }\n}\n"
        );
    }
}
