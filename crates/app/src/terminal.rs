//! Text rendering of study-mode updates; the terminal stand-in for the
//! glossary page.

use std::io::{self, BufRead, Write};

use glossary_core::model::{
    NavigationOutcome, ProgressSnapshot, SessionSummary, StudyEvent, StudyItem,
};
use services::{CardView, StudyError, StudyModeService, StudyUpdate};

/// One keypress-equivalent from the study prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyCommand {
    Flip,
    Next,
    Previous,
    Reset,
    Exit,
    Help,
}

impl StudyCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "f" | "flip" => Some(Self::Flip),
            "n" | "next" | ">" => Some(Self::Next),
            "p" | "prev" | "previous" | "<" => Some(Self::Previous),
            "r" | "reset" => Some(Self::Reset),
            "q" | "quit" | "exit" => Some(Self::Exit),
            "?" | "h" | "help" => Some(Self::Help),
            _ => None,
        }
    }
}

pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "  [enter]/f flip   n next   p previous   r reset   q exit   ? help"
    )
}

pub fn print_browse(
    out: &mut impl Write,
    items: &[StudyItem],
    categories: &[&str],
) -> io::Result<()> {
    writeln!(out, "Categories: {}", categories.join(", "))?;
    writeln!(out)?;
    for item in items {
        writeln!(out, "{}  [{}]", item.term(), item.category())?;
        writeln!(out, "    {}", item.definition())?;
        if !item.example().is_empty() {
            writeln!(out, "    Example: {}", item.example())?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{} terms", items.len())
}

fn print_card(out: &mut impl Write, card: &CardView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}  ({})", card.term, card.category)?;
    if card.face_up {
        writeln!(out, "  {}", card.definition)?;
        if !card.example.is_empty() {
            writeln!(out, "  Example: {}", card.example)?;
        }
    }
    Ok(())
}

fn print_progress(out: &mut impl Write, p: &ProgressSnapshot) -> io::Result<()> {
    writeln!(
        out,
        "Card: {}/{} | Studied: {}/{} | Score: {} | Streak: {} | {:.0}%",
        p.current, p.total, p.studied, p.total, p.score, p.streak, p.percentage
    )
}

fn print_event(out: &mut impl Write, event: &StudyEvent) -> io::Result<()> {
    match event {
        StudyEvent::Started { total } => {
            writeln!(out, "Study mode activated with {total} terms.")
        }
        StudyEvent::Navigated(NavigationOutcome::AtEnd) => {
            writeln!(out, "You've reached the last card!")
        }
        StudyEvent::StreakMilestone(n) => writeln!(out, "*** {n} Card Streak! ***"),
        StudyEvent::CompletionMilestone(m) => writeln!(out, "*** {} ***", m.label()),
        StudyEvent::SessionReset => writeln!(out, "Session reset! Starting fresh."),
        StudyEvent::Finished(summary) => print_summary(out, summary),
        StudyEvent::Revealed(_) | StudyEvent::Navigated(_) => Ok(()),
    }
}

pub fn print_summary(out: &mut impl Write, summary: &SessionSummary) -> io::Result<()> {
    writeln!(
        out,
        "Session Complete! You studied {}/{} cards ({}%). Final score: {}",
        summary.studied, summary.total, summary.percentage, summary.score
    )
}

pub fn render(out: &mut impl Write, update: &StudyUpdate) -> io::Result<()> {
    for event in &update.events {
        print_event(out, event)?;
    }
    if let Some(card) = &update.card {
        print_card(out, card)?;
    }
    print_progress(out, &update.snapshot)
}

/// Run the interactive loop until the user exits or input ends.
pub fn run_study(
    study: &mut StudyModeService,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let first = study.start()?;
    render(out, &first)?;
    print_help(out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let Some(command) = StudyCommand::parse(&line) else {
            writeln!(out, "unknown command: {}", line.trim())?;
            continue;
        };

        let update = match command {
            StudyCommand::Flip => study.flip(),
            StudyCommand::Next => study.next(),
            StudyCommand::Previous => study.previous(),
            StudyCommand::Reset => study.reset(),
            StudyCommand::Help => {
                print_help(out)?;
                continue;
            }
            StudyCommand::Exit => break,
        };
        match update {
            Ok(update) => render(out, &update)?,
            Err(StudyError::EmptyCatalog) => writeln!(out, "No terms match the current filter.")?,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(summary) = study.exit()? {
        print_event(out, &StudyEvent::Finished(summary))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use glossary_core::model::Catalog;
    use glossary_core::time::fixed_clock;

    #[test]
    fn parses_commands() {
        assert_eq!(StudyCommand::parse(""), Some(StudyCommand::Flip));
        assert_eq!(StudyCommand::parse(" n "), Some(StudyCommand::Next));
        assert_eq!(StudyCommand::parse("<"), Some(StudyCommand::Previous));
        assert_eq!(StudyCommand::parse("q"), Some(StudyCommand::Exit));
        assert_eq!(StudyCommand::parse("xyz"), None);
    }

    #[test]
    fn boundary_at_first_card_prints_nothing() {
        let mut out = Vec::new();
        print_event(&mut out, &StudyEvent::Navigated(NavigationOutcome::AtStart)).unwrap();
        assert!(out.is_empty());

        print_event(&mut out, &StudyEvent::Navigated(NavigationOutcome::AtEnd)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "You've reached the last card!\n");
    }

    #[test]
    fn scripted_session_prints_summary() {
        let mut study = StudyModeService::new(fixed_clock(), Arc::new(Catalog::builtin()))
            .with_rng_seed(8);
        study.set_filter("", Some("Technical Analysis"));

        let script = "f\nn\nf\nn\nf\nn\nf\nn\nq\n";
        let mut out = Vec::new();
        run_study(&mut study, script.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Study mode activated with 4 terms."));
        assert!(text.contains("Quarter Master!"));
        assert!(text.contains("Master Completed!"));
        assert!(text.contains("You've reached the last card!"));
        assert!(text.contains("You studied 4/4 cards (100%). Final score: 40"));
        assert!(!study.is_active());
    }
}
