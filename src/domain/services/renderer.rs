//! Renderer domain service
//!
//! Turns an ordered module list into barrel text. Output depends only on the
//! inputs, so rendering the same scan twice yields identical bytes.

use crate::domain::entities::{ExportStyle, ModuleEntry};
use crate::domain::value_objects::{pascal_case, ExtensionMode, OWNERSHIP_HEADER};

/// Import path for a module under the given extension mode
pub fn module_specifier(module: &ModuleEntry, mode: ExtensionMode) -> String {
    if module.is_directory {
        return format!("./{}", module.specifier);
    }

    match mode {
        ExtensionMode::None => format!("./{}", module.specifier),
        ExtensionMode::Ts => {
            let ext = module
                .filename
                .rfind('.')
                .map(|idx| &module.filename[idx..])
                .unwrap_or(".ts");
            format!("./{}{}", module.specifier, ext)
        }
        ExtensionMode::Js => {
            let ext = if module.filename.ends_with(".mts") {
                ".mjs"
            } else if module.filename.ends_with(".cts") {
                ".cjs"
            } else {
                ".js"
            };
            format!("./{}{}", module.specifier, ext)
        }
    }
}

/// One export line, without the trailing newline
pub fn export_line(module: &ModuleEntry, mode: ExtensionMode) -> String {
    let specifier = module_specifier(module, mode);
    match module.style {
        ExportStyle::Star => format!("export * from '{specifier}';"),
        ExportStyle::Namespace => format!(
            "export * as {} from '{specifier}';",
            pascal_case(&module.filename)
        ),
    }
}

/// Header line followed by one newline-terminated line per module
pub fn render_barrel(modules: &[ModuleEntry], mode: ExtensionMode) -> String {
    let mut out = String::from(OWNERSHIP_HEADER);
    for module in modules {
        out.push_str(&export_line(module, mode));
        out.push('\n');
    }
    out
}
