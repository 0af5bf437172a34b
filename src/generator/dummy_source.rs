//! Placeholder implementation file.

use super::Generator;

/// Empty Objective-C class so a target always has one compiled source.
#[derive(Debug, Clone)]
pub struct DummySource {
    class_name: String,
}

impl DummySource {
    /// Dummy source for a target label. Characters that cannot appear in
    /// an identifier become `_`.
    pub fn new(label: &str) -> Self {
        let sanitized: String = label
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        DummySource {
            class_name: format!("HarbourDummy_{}", sanitized),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl Generator for DummySource {
    fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str("#import <Foundation/Foundation.h>\n");
        output.push_str(&format!("@interface {} : NSObject\n", self.class_name));
        output.push_str("@end\n");
        output.push_str(&format!("@implementation {}\n", self.class_name));
        output.push_str("@end\n");
        output
    }
}
