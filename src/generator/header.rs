//! Prefix and umbrella headers.

use crate::core::platform::Platform;

use super::Generator;

/// Import of the platform UI framework, with a `FOUNDATION_EXPORT`
/// fallback for plain C translation units.
fn platform_import(platform: Platform) -> String {
    let framework = platform.ui_framework();
    let mut output = String::new();
    output.push_str("#ifdef __OBJC__\n");
    output.push_str(&format!("#import <{}/{}.h>\n", framework, framework));
    output.push_str("#else\n");
    output.push_str("#ifndef FOUNDATION_EXPORT\n");
    output.push_str("#if defined(__cplusplus)\n");
    output.push_str("#define FOUNDATION_EXPORT extern \"C\"\n");
    output.push_str("#else\n");
    output.push_str("#define FOUNDATION_EXPORT extern\n");
    output.push_str("#endif\n");
    output.push_str("#endif\n");
    output.push_str("#endif\n");
    output
}

/// Prefix header compiled into every source of a target.
#[derive(Debug, Clone)]
pub struct PrefixHeader {
    platform: Platform,
    contents: Vec<String>,
}

impl PrefixHeader {
    pub fn new(platform: Platform) -> Self {
        PrefixHeader {
            platform,
            contents: Vec::new(),
        }
    }

    /// Append a block of prefix contents. Identical blocks are kept once.
    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        let contents = contents.into();
        if !contents.trim().is_empty() && !self.contents.contains(&contents) {
            self.contents.push(contents);
        }
        self
    }
}

impl Generator for PrefixHeader {
    fn generate(&self) -> String {
        let mut output = platform_import(self.platform);
        output.push('\n');
        for block in &self.contents {
            output.push_str(block.trim_end());
            output.push('\n');
        }
        output
    }
}

/// Umbrella header re-exporting every public header of a framework.
#[derive(Debug, Clone)]
pub struct UmbrellaHeader {
    platform: Platform,
    module_name: String,
    imports: Vec<String>,
}

impl UmbrellaHeader {
    pub fn new(platform: Platform, module_name: impl Into<String>) -> Self {
        UmbrellaHeader {
            platform,
            module_name: module_name.into(),
            imports: Vec::new(),
        }
    }

    /// Set the imported header paths. They are emitted sorted and once each.
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports.extend(imports.into_iter().map(Into::into));
        self.imports.sort();
        self.imports.dedup();
        self
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }
}

impl Generator for UmbrellaHeader {
    fn generate(&self) -> String {
        let mut output = platform_import(self.platform);
        output.push('\n');
        for import in &self.imports {
            output.push_str(&format!("#import \"{}\"\n", import));
        }
        output.push('\n');
        output.push_str(&format!(
            "FOUNDATION_EXPORT double {}VersionNumber;\n",
            self.module_name
        ));
        output.push_str(&format!(
            "FOUNDATION_EXPORT const unsigned char {}VersionString[];\n",
            self.module_name
        ));
        output.push('\n');
        output
    }
}
