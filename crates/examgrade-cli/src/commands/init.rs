//! The `examgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create examgrade.toml
    if std::path::Path::new("examgrade.toml").exists() {
        println!("examgrade.toml already exists, skipping.");
    } else {
        std::fs::write("examgrade.toml", SAMPLE_CONFIG)?;
        println!("Created examgrade.toml");
    }

    // Create example answer sheet
    let example_path = std::path::Path::new("answers.json");
    if example_path.exists() {
        println!("answers.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ANSWERS)?;
        println!("Created answers.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit examgrade.toml with your category and PwD status");
    println!("  2. Run: examgrade validate --file answers.json");
    println!("  3. Run: examgrade estimate --file answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examgrade configuration

# Reject answer sheets whose file name does not end in .json
require_json_extension = false

[profile]
# gen, ews, obc, sc, st (leave empty for none)
category = ""
# male, female
gender = ""
# up, other
state = ""
# yes, no
pwd = ""
"#;

const EXAMPLE_ANSWERS: &str = r#"{
  "q1": "A",
  "q2": "B",
  "q3": "C",
  "q4": "D",
  "q5": "A",
  "q6": "C",
  "q7": "C",
  "q8": "D",
  "q9": "B",
  "q10": "B"
}
"#;
