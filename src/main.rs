//! CLI entrypoint for Duet Quiz
//!
//! Wires the storage and relay adapters to the game handlers so a whole game can be
//! played locally, and exposes the round two planner on its own.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use duet_quiz::adapters::{BroadcastRelay, FileSessionStore, InMemorySessionStore};
use duet_quiz::application::{
    CreateGameCommand, CreateGameHandler, DealRoundOneCommand, DealRoundOneHandler, DealerRng,
    StartRoundTwoCommand, StartRoundTwoHandler, SubmitAnswerCommand, SubmitAnswerHandler,
    UnlockRoundTwoCommand, UnlockRoundTwoHandler,
};
use duet_quiz::config::AppConfig;
use duet_quiz::domain::foundation::{CommandMetadata, QuestionId, SessionId};
use duet_quiz::domain::game::{GameSession, RoundResults};
use duet_quiz::domain::paywall::CheckoutReturn;
use duet_quiz::domain::personalization::{AllocationPlan, RoundTwoPersonalizer};
use duet_quiz::domain::quiz::{Answer, Choice, Partner, QuestionCatalog, Round};
use duet_quiz::ports::{ActionRelay, SessionStore};

/// CLI arguments for duet-quiz
#[derive(Parser, Debug)]
#[command(name = "duet-quiz")]
#[command(author, version, about = "Two-player relationship quiz")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a full game with two simulated partners
    Simulate {
        /// Seed for dealing and for the simulated partners
        #[arg(long)]
        seed: Option<u64>,

        /// Probability that partner two picks the same option as partner one
        #[arg(long, default_value_t = 0.7, value_parser = parse_agreement)]
        agreement: f64,

        /// Name of partner one
        #[arg(long, default_value = "Alex")]
        partner_one: String,

        /// Name of partner two
        #[arg(long, default_value = "Sam")]
        partner_two: String,

        /// Keep session snapshots under the configured data directory
        #[arg(long)]
        persist: bool,
    },

    /// Print the round two allocation and deck for a set of round one answers
    Plan {
        /// YAML list of `{question_id, one, two}` entries
        #[arg(long, value_name = "PATH")]
        answers: PathBuf,

        /// Seed for the allocation and sampling draws
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Accepts a finite probability in `0.0..=1.0`.
fn parse_agreement(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("`{raw}` must be between 0.0 and 1.0"));
    }
    Ok(value)
}

/// One round one answer pair as read by `plan`.
#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: QuestionId,
    one: Choice,
    two: Choice,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let logging = match cli.verbose {
        0 => config.logging.clone(),
        1 => config.logging.clone().with_filter("info"),
        2 => config.logging.clone().with_filter("debug"),
        _ => config.logging.clone().with_filter("trace"),
    };
    logging.init().context("Failed to install tracing subscriber")?;

    let catalog = Arc::new(
        config
            .game
            .load_catalog()
            .context("Failed to load question catalog")?,
    );
    info!(questions = catalog.len(), "Question catalog loaded");

    match cli.command {
        Command::Simulate {
            seed,
            agreement,
            partner_one,
            partner_two,
            persist,
        } => {
            let seed = seed.or(config.game.rng_seed);
            let store: Arc<dyn SessionStore> = if persist {
                Arc::new(FileSessionStore::new(&config.game.data_dir))
            } else {
                Arc::new(InMemorySessionStore::new())
            };
            simulate(&config, store, catalog, seed, agreement, partner_one, partner_two).await
        }
        Command::Plan { answers, seed } => plan(&catalog, &answers, seed.or(config.game.rng_seed)),
    }
}

async fn simulate(
    config: &AppConfig,
    store: Arc<dyn SessionStore>,
    catalog: Arc<QuestionCatalog>,
    seed: Option<u64>,
    agreement: f64,
    partner_one: String,
    partner_two: String,
) -> Result<()> {
    // === Dependency Injection ===
    let relay: Arc<dyn ActionRelay> = Arc::new(BroadcastRelay::new(config.game.relay_capacity));

    let create = CreateGameHandler::new(store.clone());
    let deal_one = DealRoundOneHandler::new(
        store.clone(),
        relay.clone(),
        catalog.clone(),
        DealerRng::from_seed_option(seed),
    );
    let submit = SubmitAnswerHandler::new(store.clone(), relay.clone());
    let unlock = UnlockRoundTwoHandler::new(store.clone(), relay.clone());
    let start_two = StartRoundTwoHandler::new(
        store,
        relay,
        catalog,
        DealerRng::from_seed_option(seed.map(|s| s.wrapping_add(1))),
    );
    let mut players = seed.map_or_else(StdRng::from_entropy, |s| {
        StdRng::seed_from_u64(s.wrapping_add(2))
    });

    let host = CommandMetadata::new(Partner::One);

    let session = create
        .handle(
            CreateGameCommand {
                partner_one,
                partner_two,
            },
            host.clone(),
        )
        .await
        .context("Failed to create game")?
        .session;
    let session_id = *session.id();

    println!();
    println!(
        "Duet Quiz: {} & {}",
        session.partner_name(Partner::One),
        session.partner_name(Partner::Two)
    );

    let dealt = deal_one
        .handle(DealRoundOneCommand { session_id }, host.clone())
        .await
        .context("Failed to deal round one")?
        .session;
    let session = play_round(&submit, dealt, Round::One, agreement, &mut players).await?;
    print_results(&session, &session.round_results(Round::One));

    if config.paywall_enabled() {
        println!(
            "Round two costs {}: {}",
            config.payment.display_price(),
            config.payment.checkout_link(&session_id)
        );
    }
    unlock
        .handle(
            UnlockRoundTwoCommand {
                session_id,
                outcome: CheckoutReturn::Completed,
            },
            host.clone(),
        )
        .await
        .context("Failed to unlock round two")?;

    let started = start_two
        .handle(StartRoundTwoCommand { session_id }, host)
        .await
        .context("Failed to start round two")?;
    print_plan(&started.plan);

    let session = play_round(&submit, started.session, Round::Two, agreement, &mut players).await?;
    print_results(&session, &session.round_results(Round::Two));

    Ok(())
}

/// Answers every card of `round` for both partners.
async fn play_round(
    submit: &SubmitAnswerHandler,
    session: GameSession,
    round: Round,
    agreement: f64,
    players: &mut StdRng,
) -> Result<GameSession> {
    let session_id: SessionId = *session.id();
    let card_ids: Vec<_> = session.cards(round).iter().map(|card| card.id).collect();
    let mut latest = session;

    for card_id in card_ids {
        let one = if players.gen_bool(0.5) {
            Choice::A
        } else {
            Choice::B
        };
        let two = if players.gen_bool(agreement) {
            one
        } else {
            flip(one)
        };

        for (partner, choice) in [(Partner::One, one), (Partner::Two, two)] {
            latest = submit
                .handle(
                    SubmitAnswerCommand {
                        session_id,
                        card_id,
                        partner,
                        choice,
                    },
                    CommandMetadata::new(partner),
                )
                .await
                .with_context(|| format!("Failed to answer {} for {}", card_id, partner))?
                .session;
        }
    }

    Ok(latest)
}

fn plan(catalog: &QuestionCatalog, path: &Path, seed: Option<u64>) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers from {}", path.display()))?;
    let rows: Vec<AnswerRow> =
        serde_yaml::from_str(&raw).context("Answers must be a YAML list of {question_id, one, two}")?;

    let answers = rows
        .into_iter()
        .map(|row| {
            let question = catalog
                .get(&row.question_id)
                .with_context(|| format!("Unknown question {}", row.question_id))?;
            Ok(Answer::resolved(
                row.question_id,
                question.theme,
                row.one,
                row.two,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let deck = RoundTwoPersonalizer::personalize(&answers, catalog, &mut rng);

    print_plan(&deck.plan);
    for (i, question) in deck.questions.iter().enumerate() {
        println!("{:>2}. [{}] {}", i + 1, question.theme, question.text);
    }
    Ok(())
}

fn flip(choice: Choice) -> Choice {
    match choice {
        Choice::A => Choice::B,
        Choice::B => Choice::A,
    }
}

fn print_results(session: &GameSession, results: &RoundResults) {
    println!();
    println!(
        "Round {} - {} of {} matched ({})",
        results.round.number(),
        results.matched,
        results.total,
        results.agreement
    );
    for (theme, score) in results.per_theme.iter().filter(|(_, s)| s.total > 0) {
        println!(
            "  {:<10} {:>2}/{:<2} {}",
            theme.label(),
            score.matched,
            score.total,
            score.agreement()
        );
    }
    if let Some(theme) = results.strongest {
        println!("  Strongest: {}", theme.label());
    }
    let discuss = results.themes_to_discuss();
    if !discuss.is_empty() {
        let labels: Vec<_> = discuss.iter().map(|theme| theme.label()).collect();
        println!("  Worth talking about: {}", labels.join(", "));
    }
    info!(session = %session.id(), phase = %session.phase(), "Results shown");
}

fn print_plan(plan: &AllocationPlan) {
    println!();
    println!("Round two plan: {:?}", plan.strategy);
    for (theme, count) in plan.allocation.iter().filter(|(_, count)| *count > 0) {
        println!("  {:<10} {}", theme.label(), count);
    }
    if plan.shortfall > 0 {
        println!("  ({} slots could not be filled)", plan.shortfall);
    }
}
