use std::io::{BufRead, Write};

use seatmap_core::{Cabin, CabinRepository, SeatPreference, ServiceClass};
use seatmap_store::app_config::SessionConfig;
use seatmap_store::ReportFormat;
use tracing::{debug, info, warn};

use crate::menu::{MenuChoice, MENU};

/// One interactive reservation session over a single flight
pub struct Session<'a, R, W> {
    cabin: Cabin,
    repository: &'a dyn CabinRepository,
    settings: SessionConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(repository: &'a dyn CabinRepository, settings: SessionConfig, input: R, output: W) -> Self {
        Self {
            cabin: Cabin::new(),
            repository,
            settings,
            input,
            output,
        }
    }

    pub fn cabin(&self) -> &Cabin {
        &self.cabin
    }

    /// Load the flight, then serve menu commands until quit or end of input.
    /// The flight is saved on the way out.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.load()?;

        let served = self.serve();
        self.save()?;
        served?;

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn serve(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };

            match choice.parse::<MenuChoice>() {
                Ok(MenuChoice::AddPassenger) => self.add_passenger()?,
                Ok(MenuChoice::AddGroup) => self.add_group()?,
                Ok(MenuChoice::Cancel) => self.cancel_reservations()?,
                Ok(MenuChoice::Availability) => self.print_availability()?,
                Ok(MenuChoice::Manifest) => self.print_manifest()?,
                Ok(MenuChoice::Quit) => break,
                Err(other) => {
                    debug!(choice = %other, "unknown menu choice");
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                }
            }
        }

        Ok(())
    }

    /// Replace the cabin with the persisted flight. A failed load is reported
    /// and leaves the cabin empty.
    pub fn load(&mut self) -> anyhow::Result<()> {
        let mut cabin = Cabin::new();
        match cabin.load_from(self.repository) {
            Ok(applied) => {
                info!(
                    seats = applied,
                    first = cabin.occupied_count(ServiceClass::First),
                    economy = cabin.occupied_count(ServiceClass::Economy),
                    "flight loaded"
                );
                self.cabin = cabin;
            }
            Err(e) => {
                warn!("Load failed: {}", e);
                writeln!(self.output, "{}", e)?;
                self.cabin = Cabin::new();
            }
        }
        Ok(())
    }

    /// Persist the cabin. A failed save is reported and memory is left as is.
    pub fn save(&mut self) -> anyhow::Result<()> {
        if let Err(e) = self.cabin.save_to(self.repository) {
            warn!("Save failed: {}", e);
            writeln!(self.output, "{}", e)?;
        }
        Ok(())
    }

    fn add_passenger(&mut self) -> anyhow::Result<()> {
        loop {
            let Some(name) = self.prompt("Name: ")? else {
                return Ok(());
            };
            if !self.check_name(&name)? {
                return Ok(());
            }
            let Some(class) = self.prompt_class()? else {
                return Ok(());
            };

            let Some(text) = self.prompt("Seat Preference (W)indow, (C)enter, (A)isle: ")? else {
                return Ok(());
            };
            let preference = match text.parse::<SeatPreference>() {
                Ok(preference) => preference,
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.output, "Invalid seat preference. Please use W, C, or A.")?;
                    return Ok(());
                }
            };

            match self.cabin.reserve_single(&name, class, preference) {
                Ok(assignment) => {
                    writeln!(
                        self.output,
                        "Seat {} reserved for {} in {} class.",
                        assignment.seat, name, class
                    )?;
                    return Ok(());
                }
                Err(e) => {
                    writeln!(self.output, "{}.", e)?;
                    if !self.settings.offer_alternate_preference {
                        return Ok(());
                    }

                    let answer = self.prompt("Would you like another seat preference? (Y/N): ")?;
                    if !answer.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn add_group(&mut self) -> anyhow::Result<()> {
        let Some(text) = self.prompt("Number of passengers in group: ")? else {
            return Ok(());
        };
        let seats: usize = ServiceClass::ALL.iter().map(|class| self.cabin.capacity(*class)).sum();
        let size = match text.parse::<usize>() {
            Ok(size) if size > 0 && size <= seats => size,
            _ => {
                writeln!(self.output, "Invalid number. Please try again.")?;
                return Ok(());
            }
        };

        let mut names = Vec::new();
        for i in 1..=size {
            let Some(name) = self.prompt(&format!("Passenger {} name: ", i))? else {
                return Ok(());
            };
            names.push(name);
        }
        for name in &names {
            if !self.check_name(name)? {
                return Ok(());
            }
        }

        let Some(class) = self.prompt_class()? else {
            return Ok(());
        };

        match self.cabin.reserve_group(&names, class) {
            Ok(seats) => {
                writeln!(self.output, "Group reservation successful:")?;
                for seat in seats {
                    writeln!(self.output, "{}: {}", seat.seat, seat.passenger)?;
                }
            }
            Err(e) => {
                debug!("{}", e);
                writeln!(
                    self.output,
                    "Unable to accommodate the entire group. No seats have been reserved."
                )?;
            }
        }
        Ok(())
    }

    fn cancel_reservations(&mut self) -> anyhow::Result<()> {
        let Some(text) = self.prompt("Enter passenger names to cancel (comma-separated): ")? else {
            return Ok(());
        };
        let names: Vec<&str> = text.split(',').map(str::trim).filter(|n| !n.is_empty()).collect();

        let cancelled = self.cabin.cancel_by_names(&names);
        if cancelled.is_empty() {
            writeln!(self.output, "No reservations found for the specified passengers.")?;
        } else {
            writeln!(self.output, "Cancelled reservations for: {}", cancelled.join(", "))?;
        }
        Ok(())
    }

    fn print_availability(&mut self) -> anyhow::Result<()> {
        let report = self.cabin.list_availability();
        writeln!(self.output)?;
        writeln!(self.output, "Availability List:")?;
        match self.settings.report_format {
            ReportFormat::Text => write!(self.output, "{}", report)?,
            ReportFormat::Json => writeln!(self.output, "{}", serde_json::to_string_pretty(&report)?)?,
        }
        Ok(())
    }

    fn print_manifest(&mut self) -> anyhow::Result<()> {
        let manifest = self.cabin.list_manifest();
        writeln!(self.output)?;
        writeln!(self.output, "Manifest List:")?;
        match self.settings.report_format {
            ReportFormat::Text => write!(self.output, "{}", manifest)?,
            ReportFormat::Json => writeln!(self.output, "{}", serde_json::to_string_pretty(&manifest)?)?,
        }
        Ok(())
    }

    fn prompt_class(&mut self) -> anyhow::Result<Option<ServiceClass>> {
        let Some(text) = self.prompt("Service Class: ")? else {
            return Ok(None);
        };
        match text.parse::<ServiceClass>() {
            Ok(class) => Ok(Some(class)),
            Err(e) => {
                debug!("{}", e);
                writeln!(self.output, "Invalid service class. Please use 'First' or 'Economy'.")?;
                Ok(None)
            }
        }
    }

    /// Names end up in a comma-separated flight file, so blanks and commas are refused
    fn check_name(&mut self, name: &str) -> anyhow::Result<bool> {
        if name.is_empty() {
            writeln!(self.output, "Passenger name cannot be empty.")?;
            return Ok(false);
        }
        if name.contains(',') {
            writeln!(self.output, "Passenger names cannot contain commas.")?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Print a prompt and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
