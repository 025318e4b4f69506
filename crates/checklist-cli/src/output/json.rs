use checklist_core::error::ChecklistError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), ChecklistError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
