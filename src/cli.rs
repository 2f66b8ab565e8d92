//! Minimal CLI: new | check | rules
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ErrorKind;
use crate::recipe::BurgerRecipe;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// build and validate burger recipes
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// build one recipe from flags (or inline JSON) and print it
    New(NewOut),
    /// validate recipe documents from JSON/NDJSON files
    Check(CheckOut),
    /// print the recipe rules as a JSON-schema-ish document
    Rules(RulesOut),
}

#[derive(Args, Debug, Clone)]
pub struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    pub ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /order/recipe)
    #[arg(long)]
    pub json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    pub jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    pub input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct NewOut {
    #[arg(long, required_unless_present = "json", allow_negative_numbers = true)]
    buns: Option<i64>,
    #[arg(long, required_unless_present = "json", allow_negative_numbers = true)]
    cheese: Option<i64>,
    #[arg(long, required_unless_present = "json", allow_negative_numbers = true)]
    tomatoes: Option<i64>,
    #[arg(long, required_unless_present = "json", allow_negative_numbers = true)]
    cutlets: Option<i64>,
    #[arg(long, required_unless_present = "json", allow_negative_numbers = true)]
    eggs: Option<i64>,
    #[arg(long, required_unless_present = "json")]
    sauce: Option<String>,

    /// whole recipe as a JSON object instead of the flags above
    #[arg(long, conflicts_with_all = ["buns", "cheese", "tomatoes", "cutlets", "eggs", "sauce"])]
    json: Option<String>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// print a JSON report instead of one line per recipe
    #[arg(long)]
    json: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct RulesOut {
    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One candidate recipe and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub source: String,
    pub value: Value,
}

#[derive(Debug)]
pub struct Outcome {
    pub source: String,
    pub result: crate::Result<BurgerRecipe>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Read every input and flatten it into candidate documents.
    ///
    /// A document that is a JSON array counts as a list of candidates.
    pub fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut out = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            for (ix, json_value) in read_values(&source_path, self.ndjson)?.into_iter().enumerate() {
                let label = if self.ndjson {
                    format!("{source_path_str}:{}", ix + 1)
                } else {
                    source_path_str.clone()
                };
                for value in self.preprocess(json_value, &label)? {
                    match value {
                        Value::Array(items) => {
                            for (jx, item) in items.into_iter().enumerate() {
                                out.push(Document { source: format!("{label}[{jx}]"), value: item });
                            }
                        }
                        value => out.push(Document { source: label.clone(), value }),
                    }
                }
            }
            info!(path = %source_path_str, "loaded input");
        }
        Ok(out)
    }

    fn preprocess(&self, json_value: Value, label: &str) -> Result<Vec<Value>> {
        let json_value = match self.json_pointer.as_deref() {
            None => json_value,
            Some(pointer) => json_value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| anyhow!("JSON pointer {pointer} matched nothing in {label}"))?,
        };
        match self.jq_expr.as_deref() {
            None => Ok(vec![json_value]),
            Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &json_value)
                .with_context(|| format!("failed to apply jq expression to {label}")),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Returns `false` when some recipe was rejected.
    pub fn run(&self) -> Result<bool> {
        match &self.cmd {
            Command::New(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(true)
                }
                match target.build() {
                    Ok(recipe) => {
                        println!("{recipe}");
                        Ok(true)
                    }
                    // unparseable --json is an input error, not a rejected recipe
                    Err(error) if error.kind() == ErrorKind::Decode => {
                        Err(anyhow::Error::new(error).context("failed to read --json recipe"))
                    }
                    Err(error) => {
                        eprintln!("{} {error}", "✗".red());
                        Ok(false)
                    }
                }
            }
            Command::Check(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(true)
                }
                let documents = target.input_settings.load_documents()?;
                let outcomes = check_documents(documents);
                let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
                info!(total = outcomes.len(), failed, "checked recipes");

                if target.json {
                    let report: Vec<Value> = outcomes.iter().map(Outcome::to_json).collect();
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    for outcome in &outcomes {
                        match &outcome.result {
                            Ok(recipe) => println!("{} {}: {recipe}", "✓".green(), outcome.source),
                            Err(error) => println!("{} {}: {error}", "✗".red(), outcome.source),
                        }
                    }
                }
                Ok(failed == 0)
            }
            Command::Rules(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(true)
                }
                let schema = crate::schema::emit_schema();
                let schema_src = serde_json::to_string_pretty(&schema)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &schema_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{schema_src}");
                }
                Ok(true)
            }
        }
    }
}

impl NewOut {
    fn build(&self) -> crate::Result<BurgerRecipe> {
        if let Some(src) = self.json.as_deref() {
            return crate::path_de::from_str_with_path(src);
        }
        let (Some(buns), Some(cheese), Some(tomatoes), Some(cutlets), Some(eggs), Some(sauce)) =
            (self.buns, self.cheese, self.tomatoes, self.cutlets, self.eggs, self.sauce.as_deref())
        else {
            unreachable!("clap requires every recipe flag when --json is absent")
        };
        BurgerRecipe::new(buns, cheese, tomatoes, cutlets, eggs, sauce)
    }
}

impl Outcome {
    /// One entry of the `check --json` report.
    pub fn to_json(&self) -> Value {
        match &self.result {
            Ok(recipe) => json!({ "source": self.source, "ok": true, "recipe": recipe }),
            Err(error) => json!({
                "source": self.source,
                "ok": false,
                "field": error.field(),
                "error": error.to_string(),
            }),
        }
    }
}

/// Validate every document as a recipe, keeping going past failures.
pub fn check_documents(documents: Vec<Document>) -> Vec<Outcome> {
    documents
        .into_iter()
        .map(|doc| Outcome { result: BurgerRecipe::from_value(&doc.value), source: doc.source })
        .collect()
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_values(path: &Path, ndjson: bool) -> Result<Vec<Value>> {
    let path_str = path.to_string_lossy();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {path_str}"))?;
    if !ndjson {
        let value = serde_json::from_str::<Value>(&source)
            .with_context(|| format!("failed to parse JSON source file ({path_str})"))?;
        return Ok(vec![value]);
    }
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ix, line)| {
            serde_json::from_str::<Value>(line)
                .with_context(|| format!("failed to parse NDJSON line {} of {path_str}", ix + 1))
        })
        .collect()
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_without_matches_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely/not/here/*.json"]).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "b.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[test]
    fn new_from_flags_and_json() {
        let cli = CommandLineInterface::try_parse_from([
            "burger-osi", "new", "--buns", "2", "--cheese", "1", "--tomatoes", "1",
            "--cutlets", "1", "--eggs", "1", "--sauce", "mayo",
        ])
        .unwrap();
        let Command::New(target) = &cli.cmd else { panic!("expected new") };
        assert_eq!(
            target.build().unwrap().to_string(),
            "Burger(buns=2, cheese=1, tomatoes=1, cutlets=1, eggs=1, sauce='mayo')"
        );

        let cli = CommandLineInterface::try_parse_from([
            "burger-osi", "new", "--json",
            r#"{"buns": 1, "cheese": 0, "tomatoes": 0, "cutlets": 1, "eggs": 0, "sauce": "ketchup"}"#,
        ])
        .unwrap();
        let Command::New(target) = &cli.cmd else { panic!("expected new") };
        assert!(target.build().unwrap_err().to_string().contains("field `buns`"));
    }

    #[test]
    fn new_with_malformed_json_is_an_input_error() {
        let cli = CommandLineInterface::try_parse_from(["burger-osi", "new", "--json", r#"{"buns": 2,"#])
            .unwrap();
        let err = cli.run().unwrap_err();
        assert!(format!("{err:#}").contains("failed to read --json recipe"));

        let cli = CommandLineInterface::try_parse_from([
            "burger-osi", "new", "--json",
            r#"{"buns": 1, "cheese": 0, "tomatoes": 0, "cutlets": 1, "eggs": 0, "sauce": "ketchup"}"#,
        ])
        .unwrap();
        assert!(!cli.run().unwrap());
    }

    #[test]
    fn new_requires_every_flag() {
        let parsed = CommandLineInterface::try_parse_from(["burger-osi", "new", "--buns", "2"]);
        assert!(parsed.is_err());
    }
}
