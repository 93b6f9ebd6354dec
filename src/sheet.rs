use minijinja::{Environment, context};
use rand::{Rng, seq::SliceRandom};
use serde::Serialize;

use crate::exchange::LookupTable;

pub const CODES_TEMPLATE: &str = "codes.txt";

pub fn setup_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(CODES_TEMPLATE, include_str!("../templates/codes.txt"))?;
    Ok(env)
}

/// A name and the code to hand to that person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSlip {
    pub name: String,
    pub code: String,
}

/// One slip per participant in random order, so neighbours on the list
/// say nothing about who shares a duo.
pub fn code_slips<R: Rng + ?Sized>(table: &LookupTable, rng: &mut R) -> Vec<CodeSlip> {
    let mut slips: Vec<CodeSlip> = table
        .iter()
        .map(|(code, entry)| CodeSlip {
            name: entry.name.clone(),
            code: code.clone(),
        })
        .collect();
    slips.shuffle(rng);
    slips
}

pub fn render_codes_sheet(
    env: &Environment<'_>,
    slips: &[CodeSlip],
) -> Result<String, minijinja::Error> {
    env.get_template(CODES_TEMPLATE)?
        .render(context! { rows => slips })
}
