use checklist_core::error::ChecklistError;
use checklist_core::layout::{builtin, load_layout};
use std::path::Path;

use crate::output;

pub fn show(preset: &str, raw_json: bool) -> Result<(), ChecklistError> {
    if raw_json {
        let json = builtin::preset_json(preset).ok_or_else(|| {
            ChecklistError::LayoutInvalid(format!(
                "unknown preset '{preset}'. Available: {}",
                builtin::PRESETS.join(", ")
            ))
        })?;
        println!("{json}");
        return Ok(());
    }

    let layout = builtin::load_preset(preset)?;
    print!("{}", output::table::format_layout(&layout));
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ChecklistError> {
    let layout = load_layout(file)?;

    println!("Layout '{}' (v{}) is valid.", layout.name, layout.version);
    println!("  Sections: {}", layout.sections.len());
    println!("  Skip tokens: {}", layout.skip_tokens.len());
    println!(
        "  Continuation suffixes: {}",
        layout.continuation_suffixes.len()
    );

    let mut warnings = Vec::new();
    for (i, pattern) in layout.sections.iter().enumerate() {
        // An earlier prefix that is a prefix of this one shadows it.
        if let Some(earlier) = layout.sections[..i]
            .iter()
            .find(|p| pattern.prefix.starts_with(&p.prefix))
        {
            warnings.push(format!(
                "heading '{}' is shadowed by earlier prefix '{}'",
                pattern.prefix, earlier.prefix
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }
    Ok(())
}
