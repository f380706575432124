use std::io::{BufRead, Write};

use crate::errors::MarketResult;
use crate::feed::{AdvanceOutcome, FeedController, FetchOutcome, SwipeAction, SwipeDirection, SWIPE_THRESHOLD};

/// One line of user input in the browse loop
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Quit,
    Retry,
    Drag(f64),
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" => Input::Quit,
        "retry" => Input::Retry,
        "a" | "save" => Input::Drag(-(SWIPE_THRESHOLD + 1.0)),
        "r" | "skip" => Input::Drag(SWIPE_THRESHOLD + 1.0),
        other => other.parse().map(Input::Drag).unwrap_or(Input::Unknown),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BrowseStats {
    pub viewed: usize,
    pub saved: usize,
    pub skipped: usize,
}

/// Read a line; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> MarketResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Interactive swipe loop. Each input line is a horizontal drag distance or
/// a shortcut; the feed decides what it means.
pub async fn run_browse<R: BufRead, W: Write>(
    controller: &FeedController,
    query: Option<String>,
    input: &mut R,
    out: &mut W,
) -> MarketResult<BrowseStats> {
    let mut stats = BrowseStats::default();
    let mut updates = controller.subscribe();

    controller.initialize(query);
    controller.wait_for_refill().await;
    let mut shown: Option<String> = None;

    loop {
        let product = match controller.current() {
            Some(product) => product,
            None if controller.has_more() => {
                if controller.wait_for_refill().await.is_some() {
                    continue;
                }
                // Another fetch holds the slot; wait for it to land
                if controller.request_more().await == FetchOutcome::Skipped
                    && updates.changed().await.is_err()
                {
                    break;
                }
                continue;
            }
            None => {
                // Background refills fail without the loop seeing them, so ask
                // the feed rather than remembering outcomes here
                if !controller.snapshot().last_fetch_failed {
                    writeln!(out, "No more products.")?;
                    break;
                }

                write!(out, "Could not load products. Type 'retry' to try again or 'q' to quit: ")?;
                out.flush()?;
                match read_line(input)?.as_deref().map(parse_input) {
                    Some(Input::Retry) if controller.rearm() => {
                        controller.request_more().await;
                        continue;
                    }
                    _ => break,
                }
            }
        };

        if shown.as_deref() != Some(product.id.as_str()) {
            stats.viewed += 1;
            shown = Some(product.id.clone());
        }

        writeln!(out)?;
        writeln!(out, "{} | {}", product.title, product.display_price())?;
        if !product.description.is_empty() {
            writeln!(out, "  {}", product.description)?;
        }
        if let Some(image) = product.primary_image() {
            writeln!(out, "  {}", image)?;
        }
        write!(out, "Swipe [dx | a=save | r=skip | q=quit]: ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(out)?;
            break;
        };

        let dx = match parse_input(&line) {
            Input::Quit => break,
            Input::Drag(dx) => dx,
            Input::Retry => {
                writeln!(out, "Nothing to retry.")?;
                continue;
            }
            Input::Unknown => {
                writeln!(out, "Unrecognized input: {}", line.trim())?;
                continue;
            }
        };

        let action = controller.consume_swipe(SwipeDirection::from_dx(dx), dx);
        match action {
            SwipeAction::Accept => {
                stats.saved += 1;
                writeln!(out, "Saved: {}", product.title)?;
            }
            SwipeAction::Reject => {
                stats.skipped += 1;
                writeln!(out, "Skipped: {}", product.title)?;
            }
            SwipeAction::Cancel => {
                writeln!(
                    out,
                    "Kept: {} (drag past {} to decide)",
                    product.title, SWIPE_THRESHOLD
                )?;
            }
        }

        if controller.apply_swipe(action) == Some(AdvanceOutcome::NeedsFetch) {
            controller.wait_for_refill().await;
        }
    }

    Ok(stats)
}
