use std::path::Path;

use langlines::LineFilter;

use crate::session::open_panel;

/// Run the list command: print the filtered table of language lines.
pub fn run_list_command(
    store_path: &Path,
    config_path: Option<&Path>,
    group: Option<String>,
    missing: Option<String>,
    search: Option<String>,
) -> Result<(), String> {
    let panel = open_panel(store_path, config_path)?;
    let locales = panel.store().locales();
    let rows = panel.list(&LineFilter {
        group,
        missing_locale: missing,
        search,
    });

    if rows.is_empty() {
        println!("No language lines found.");
        return Ok(());
    }

    let group_width = rows
        .iter()
        .map(|r| r.group.len())
        .chain(std::iter::once("group".len()))
        .max()
        .unwrap_or(5);
    let key_width = rows
        .iter()
        .map(|r| r.key.len())
        .chain(std::iter::once("key".len()))
        .max()
        .unwrap_or(3);

    let locale_header = locales
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{:>5}  {:<group_width$}  {:<key_width$}  {}  text",
        "id", "group", "key", locale_header
    );

    for row in rows {
        let marks = locales
            .iter()
            .map(|locale| {
                let mark = if row.present.get(locale) == Some(&true) {
                    "✓"
                } else {
                    "-"
                };
                // Pad to the locale code's width so columns line up.
                format!("{:<width$}", mark, width = locale.len())
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:>5}  {:<group_width$}  {:<key_width$}  {}  {}",
            row.id, row.group, row.key, marks, row.preview
        );
    }
    Ok(())
}
