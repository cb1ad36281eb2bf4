use bingo_poker::bingo::round::{BingoRound, DrawOutcome};
use bingo_poker::bingo::PatternKind;
use bingo_poker::config::{EngineConfig, ValidatedConfig};
use bingo_poker::evaluator::HandCategory;
use bingo_poker::hand::Hand;
use bingo_poker::paytable::Bet;
use bingo_poker::rng::{RandomSource, RngSource};
use bingo_poker::video_poker::VideoPokerRound;
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Game {
    Poker,
    Bingo,
}

/// Play rounds headless and report outcome frequencies and return-to-player.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Game::Poker)]
    game: Game,

    #[arg(short, long, default_value_t = 10_000)]
    rounds: u64,

    /// Seed for a reproducible run; OS entropy when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stake per round (per card for bingo)
    #[arg(short, long, default_value_t = 1)]
    bet: u64,

    /// TOML engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cards in play per bingo round
    #[arg(long, default_value_t = 4)]
    cards: usize,
}

#[derive(Debug)]
struct Tally<K> {
    rounds: u64,
    wagered: u64,
    paid: u64,
    outcomes: BTreeMap<K, u64>,
}

impl<K: Ord> Tally<K> {
    fn new() -> Self {
        Self { rounds: 0, wagered: 0, paid: 0, outcomes: BTreeMap::new() }
    }

    fn record(&mut self, wagered: u64, paid: u64, outcome: Option<K>) {
        self.rounds += 1;
        self.wagered = self.wagered.saturating_add(wagered);
        self.paid = self.paid.saturating_add(paid);
        if let Some(k) = outcome {
            *self.outcomes.entry(k).or_default() += 1;
        }
    }

    fn rtp(&self) -> f64 {
        if self.wagered == 0 {
            0.0
        } else {
            self.paid as f64 / self.wagered as f64
        }
    }
}

/// Hold everything on a made straight or better, otherwise hold every
/// card whose rank appears more than once.
fn choose_holds(hand: &Hand, dealt: HandCategory) -> [bool; Hand::SIZE] {
    if dealt >= HandCategory::Straight {
        return [true; Hand::SIZE];
    }
    let cards = hand.cards();
    let mut counts = [0u8; 15];
    for c in &cards {
        counts[usize::from(c.rank().value())] += 1;
    }
    cards.map(|c| counts[usize::from(c.rank().value())] > 1)
}

fn simulate_poker(
    cfg: &ValidatedConfig,
    args: &Args,
    rng: &mut dyn RandomSource,
) -> Result<(), Box<dyn Error>> {
    let bet = Bet::new(args.bet, &cfg.poker_limits)?;
    let table = cfg.poker_tables.default_snapshot();
    let mut round = VideoPokerRound::new(table.clone());
    let mut tally = Tally::<HandCategory>::new();

    for _ in 0..args.rounds {
        let hand = round.deal(bet, rng)?;
        let dealt = round.current_category().unwrap_or(HandCategory::NoWin);
        for (i, held) in choose_holds(&hand, dealt).into_iter().enumerate() {
            round.set_held(i, held)?;
        }
        let result = round.draw()?;
        tally.record(bet.amount(), result.payout, Some(result.category));
        round.reset()?;
    }

    info!(table = table.name(), rounds = tally.rounds, "video poker simulation finished");
    for (category, count) in tally.outcomes.iter().rev() {
        let share = *count as f64 / tally.rounds.max(1) as f64;
        info!(%category, count, share = %format!("{share:.5}"), "outcome");
    }
    info!(
        wagered = tally.wagered,
        paid = tally.paid,
        rtp = %format!("{:.4}", tally.rtp()),
        "return to player"
    );
    Ok(())
}

fn simulate_bingo(
    cfg: &ValidatedConfig,
    args: &Args,
    rng: &mut dyn RandomSource,
) -> Result<(), Box<dyn Error>> {
    let bet = Bet::new(args.bet, &cfg.bingo_limits)?;
    let table = cfg.bingo_tables.default_snapshot();
    let mut round = BingoRound::new(cfg.universe, table.clone(), cfg.golden_factor)?;
    let mut tally = Tally::<PatternKind>::new();
    let mut exhausted = 0u64;
    let mut bonuses = 0u64;
    let mut calls = 0u64;

    for _ in 0..args.rounds {
        let cards = BingoRound::deal_cards(cfg.universe, args.cards, rng)?;
        round.start(cards, rng)?;
        let outcome = loop {
            match round.draw_next(rng)? {
                DrawOutcome::Drawn(_) => continue,
                terminal => break terminal,
            }
        };
        calls += round.history().len() as u64;
        let wagered = bet.amount().saturating_mul(args.cards as u64);
        match outcome {
            DrawOutcome::Won(_) => {
                let settlement = round.settle(bet)?;
                bonuses += settlement.payouts.iter().filter(|p| p.bonus_applied).count() as u64;
                let best = settlement.payouts.iter().map(|p| p.kind).max();
                tally.record(wagered, settlement.total, best);
            }
            _ => {
                exhausted += 1;
                tally.record(wagered, 0, None);
            }
        }
        round.reset()?;
    }

    info!(
        table = table.name(),
        universe = cfg.universe.size(),
        rounds = tally.rounds,
        cards = args.cards,
        "bingo simulation finished"
    );
    for (kind, count) in &tally.outcomes {
        info!(%kind, count, "winning pattern");
    }
    info!(
        exhausted,
        bonuses,
        mean_calls = %format!("{:.2}", calls as f64 / tally.rounds.max(1) as f64),
        "round endings"
    );
    info!(
        wagered = tally.wagered,
        paid = tally.paid,
        rtp = %format!("{:.4}", tally.rtp()),
        "return to player"
    );
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let engine = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let cfg = engine.validate()?;
    let mut rng: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_os()?),
    };
    info!(game = ?args.game, rounds = args.rounds, seed = ?args.seed, "starting simulation");
    match args.game {
        Game::Poker => simulate_poker(&cfg, args, rng.as_mut()),
        Game::Bingo => simulate_bingo(&cfg, args, rng.as_mut()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_pairs_and_made_hands() {
        let hand: Hand = "Qs Qd 4c 7h 4s".parse().unwrap();
        assert_eq!(choose_holds(&hand, HandCategory::TwoPair), [true, true, true, false, true]);
        let hand: Hand = "9s 10d Jc Qh Ks".parse().unwrap();
        assert_eq!(choose_holds(&hand, HandCategory::Straight), [true; 5]);
        let hand: Hand = "2s 5d 9c Jh Ks".parse().unwrap();
        assert_eq!(choose_holds(&hand, HandCategory::NoWin), [false; 5]);
    }

    #[test]
    fn cli_parses_defaults() {
        let args = Args::try_parse_from(["simulate", "--game", "bingo", "--seed", "9"]).unwrap();
        assert_eq!(args.game, Game::Bingo);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.rounds, 10_000);
        assert_eq!(args.cards, 4);
    }

    #[test]
    fn short_seeded_runs_complete() {
        let cfg = EngineConfig::default().validate().unwrap();
        for game in ["poker", "bingo"] {
            let args =
                Args::try_parse_from(["simulate", "-g", game, "-r", "50", "-s", "3"]).unwrap();
            let mut rng = RngSource::seeded(3);
            let res = match args.game {
                Game::Poker => simulate_poker(&cfg, &args, &mut rng),
                Game::Bingo => simulate_bingo(&cfg, &args, &mut rng),
            };
            assert!(res.is_ok());
        }
    }
}
