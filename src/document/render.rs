//! Document rendering.

use crate::registry::Registry;

const INDENT: &str = "    ";

/// Render the whole registry into one document string
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();
    let settings = registry.settings();

    out.push_str(&format!("max_clock = {}\n", settings.max_clock));
    out.push_str(&format!("clock_granu = {}\n", settings.clock_granu));
    out.push_str(&format!("log_level = \"{}\"\n", settings.log_level));
    out.push_str(&format!("log_name = \"{}\"\n", settings.log_name));

    out.push_str("edges = [\n");
    for edge in registry.edges() {
        out.push_str(&format!("{INDENT}[\n"));
        out.push_str(&format!("{INDENT}{INDENT}\"{}\",\n", edge.src));
        out.push_str(&format!("{INDENT}{INDENT}\"{}\",\n", edge.dst));
        out.push_str(&format!("{INDENT}],\n"));
    }
    out.push_str("]\n\n");

    out.push_str("[devices]\n");
    for device in registry.devices() {
        out.push_str(&format!("{} = \"{}\"\n", device.name(), device.typename()));
    }
    out.push('\n');

    for device in registry.devices() {
        out.push_str(&device.render());
        out.push('\n');
    }
    out
}
