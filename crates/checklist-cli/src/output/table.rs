use checklist_core::layout::schema::LayoutProfile;
use checklist_core::model::Section;
use std::fmt::Write;

/// Numbered items under each section heading.
pub fn format_sections(sections: &[Section]) -> String {
    let mut out = String::new();
    if sections.is_empty() {
        out.push_str("No sections found.\n");
        return out;
    }

    let total: usize = sections.iter().map(|s| s.items.len()).sum();
    for section in sections {
        let _ = writeln!(out, "=== {} ({} items) ===\n", section.title, section.items.len());
        let width = section.items.len().to_string().len();
        for (i, item) in section.items.iter().enumerate() {
            let _ = writeln!(out, "  {:>width$}. {}", i + 1, item, width = width);
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{} sections, {} items", sections.len(), total);
    out
}

pub fn format_layout(layout: &LayoutProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (version {})\n", layout.name, layout.version);
    if let Some(desc) = &layout.description {
        let _ = writeln!(out, "{desc}\n");
    }

    let _ = writeln!(out, "Headings (first match wins):\n");
    let max_prefix = layout
        .sections
        .iter()
        .map(|p| p.prefix.len())
        .max()
        .unwrap_or(10);
    for pattern in &layout.sections {
        let _ = writeln!(
            out,
            "  {:<width$}  -> {}",
            pattern.prefix,
            pattern.title,
            width = max_prefix
        );
    }

    let join = |set: &std::collections::BTreeSet<String>| {
        set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    };
    let _ = writeln!(out, "\nSkip tokens: {}", join(&layout.skip_tokens));
    let _ = writeln!(
        out,
        "Continuation suffixes: {}",
        join(&layout.continuation_suffixes)
    );
    let _ = writeln!(
        out,
        "Dropped line prefixes: {}",
        layout.boilerplate.prefixes.join(", ")
    );

    let template = &layout.bundle.template;
    let _ = writeln!(
        out,
        "\nStatuses: {} (default: {})",
        template.status_options.join(", "),
        template.default_status
    );
    out
}
