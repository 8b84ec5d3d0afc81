//! Menu-driven console session over a [`PantryService`].

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use pantry_core::{today, PantryError};
use pantry_infra::PantryService;
use pantry_inventory::{format_quantity, format_row, AddOutcome, Item};

use crate::prompt::Prompter;

const MENU: &[&str] = &[
    "1 - View Pantry",
    "2 - Add Item",
    "3 - Remove Item",
    "4 - Enter Amount of Item Used",
    "5 - Search Pantry",
    "0 - Exit",
];

const RULE: &str = "=========================================";

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One interactive run of the pantry menu.
///
/// Input ending at any prompt ends the session as if `0` had been chosen.
pub struct Session<R, W> {
    service: PantryService,
    prompter: Prompter<R, W>,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(service: PantryService, input: R, output: W) -> Self {
        Self {
            service,
            prompter: Prompter::new(input, output),
            today: today(),
        }
    }

    /// Fix the date used for expiry columns.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn into_parts(self) -> (PantryService, W) {
        (self.service, self.prompter.into_output())
    }

    /// Show the pantry, then loop over the menu until exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.prompter.say(RULE)?;
        self.view()?;

        loop {
            self.prompter.say("")?;
            self.prompter.say(RULE)?;
            self.prompter.say("What would you like to do?")?;
            for line in MENU {
                self.prompter.say(line)?;
            }

            let Some(choice) = self.prompter.ask("> ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.view().map(|()| Flow::Continue)?,
                "2" => self.add()?,
                "3" => self.remove()?,
                "4" => self.record_usage()?,
                "5" => self.search()?,
                "0" => Flow::Exit,
                other => {
                    self.prompter.say(format!("Invalid choice '{other}'."))?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        tracing::debug!(items = self.service.items().len(), "console session ended");
        self.prompter.say("Goodbye.")
    }

    fn view(&mut self) -> io::Result<()> {
        if self.service.items().is_empty() {
            return self.prompter.say("The pantry is empty.");
        }
        self.prompter.say("Pantry Contents:")?;
        self.prompter.say("")?;
        let rows: Vec<String> = self
            .service
            .items()
            .iter()
            .map(|item| format_row(item, self.today))
            .collect();
        for row in rows {
            self.prompter.say(row)?;
        }
        Ok(())
    }

    fn add(&mut self) -> io::Result<Flow> {
        self.prompter.say("Adding Items")?;
        let Some(name) = self.prompter.ask_non_empty("Enter item name: ", "Item name")? else {
            return Ok(Flow::Exit);
        };

        if let Some(existing) = self.service.get(&name) {
            let line = format!("Already have {} of {}", amount(existing), existing.name());
            self.prompter.say(line)?;
            let Some(extra) = self.prompter.ask_quantity("Enter additional amount of item: ")?
            else {
                return Ok(Flow::Exit);
            };
            match self.service.restock(&name, extra) {
                Ok(Some(item)) => {
                    self.prompter
                        .say(format!("Updated quantity: {} of {}", amount(&item), item.name()))?;
                }
                Ok(None) => self.prompter.say(format!("Item '{name}' not found in the pantry."))?,
                Err(e) => self.report(e)?,
            }
            return Ok(Flow::Continue);
        }

        let label = match self.service.pantry().units().resolve(&name) {
            Some(unit) => format!("Enter item quantity (in {unit}): "),
            None => "Enter item quantity: ".to_string(),
        };
        let Some(quantity) = self.prompter.ask_quantity(&label)? else {
            return Ok(Flow::Exit);
        };
        let Some(exp_date) = self.prompter.ask_date("Enter expiration date (MM/DD/YYYY): ")? else {
            return Ok(Flow::Exit);
        };

        let stored = match self.service.add_or_merge(&name, quantity, &exp_date, None) {
            Ok(AddOutcome::UnitRequired(_)) => {
                let label = format!("Enter the unit for {}: ", name.trim());
                let Some(unit) = self.prompter.ask_non_empty(&label, "Unit")? else {
                    return Ok(Flow::Exit);
                };
                self.service.finalize_new_item(&name, quantity, &exp_date, &unit)
            }
            Ok(outcome) => Ok(outcome.into_item()),
            Err(e) => Err(e),
        };

        match stored {
            Ok(item) => self.prompter.say(format!(
                "Added {} {} of {} to the pantry.",
                format_quantity(quantity),
                item.unit().unwrap_or("-"),
                item.name()
            ))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> io::Result<Flow> {
        self.prompter.say("Removing Items")?;
        let Some(name) = self.prompter.ask("Enter item to remove: ")? else {
            return Ok(Flow::Exit);
        };
        if name.is_empty() {
            return Ok(Flow::Continue);
        }

        match self.service.remove(&name) {
            Ok(0) => self.prompter.say(format!("Item '{name}' not found in the pantry."))?,
            Ok(1) => self.prompter.say(format!("Removed {name} from the pantry."))?,
            Ok(n) => self.prompter.say(format!("Removed {n} entries named {name} from the pantry."))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn record_usage(&mut self) -> io::Result<Flow> {
        self.prompter.say("Entering partially used items")?;
        let Some(name) = self.prompter.ask("Enter item you used: ")? else {
            return Ok(Flow::Exit);
        };

        let Some(existing) = self.service.get(&name) else {
            self.prompter.say(format!("Item '{name}' not found in the pantry."))?;
            return Ok(Flow::Continue);
        };
        let remaining = format!("Remaining amount of {}: {}", existing.name(), amount(existing));
        let label = format!(
            "Enter the amount of the item used (in {}): ",
            existing.unit().unwrap_or("units")
        );
        self.prompter.say(remaining)?;

        let Some(used) = self.prompter.ask_quantity(&label)? else {
            return Ok(Flow::Exit);
        };
        match self.service.record_usage(&name, used) {
            Ok(Some(item)) => self
                .prompter
                .say(format!("{} of {} remaining", amount(&item), item.name()))?,
            Ok(None) => self.prompter.say(format!("Item '{name}' not found in the pantry."))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(term) = self.prompter.ask("Search for: ")? else {
            return Ok(Flow::Exit);
        };

        let rows: Vec<String> = self
            .service
            .search(&term)
            .into_iter()
            .map(|item| format_row(item, self.today))
            .collect();
        if rows.is_empty() {
            self.prompter.say(format!("No items match '{term}'."))?;
        }
        for row in rows {
            self.prompter.say(row)?;
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: PantryError) -> io::Result<()> {
        if !err.is_validation() {
            tracing::error!(error = %err, "pantry operation failed");
        }
        self.prompter.say(format!("ERROR: {err}"))
    }
}

/// `"2.5 cup"`, or just the number when the unit is unknown.
fn amount(item: &Item) -> String {
    match item.unit() {
        Some(unit) => format!("{} {unit}", format_quantity(item.quantity())),
        None => format_quantity(item.quantity()),
    }
}
