//! The `examgrade key` command.

use anyhow::Result;

use examgrade_core::answer_key::AnswerKey;

use super::OutputFormat;

pub fn execute(format: OutputFormat) -> Result<()> {
    let key = AnswerKey::standard();

    match format {
        OutputFormat::Text => {
            for (question, letter) in key.iter() {
                println!("{question}: {letter}");
            }
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = key
                .iter()
                .map(|(q, a)| (q.to_string(), serde_json::Value::from(a)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }

    Ok(())
}
