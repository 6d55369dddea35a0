//! BetAware CLI - Gambling math calculators, quizzes and simulators

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use betaware::config::Settings;
use betaware::core::ev::{evaluate, EvInputs, QuoteAnalysis};
use betaware::core::kelly::KellyCalculator;
use betaware::core::margin::{fair_probabilities, house_edge, overround_from_decimals, MarginQuote};
use betaware::core::odds::{format_american, Odds, OddsFormat};
use betaware::quiz::display::{FinalReport, OptionState, QuestionView};
use betaware::quiz::{builtin, render, Difficulty, DisplayModel, QuizSession, RiskAssessment};
use betaware::simulation::house_edge::{self as edge_sim, HouseEdgeParams};
use betaware::simulation::projection::{project, Frequency, ProjectionInputs};
use betaware::simulation::virtual_bets::{Sport, VirtualSimulator, ODDS_CHOICES};

#[derive(Parser)]
#[command(name = "betaware")]
#[command(author, version, about = "Gambling math education CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Path to a TOML settings file (defaults to $BETAWARE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Seed for reproducible simulations
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert odds between decimal, American, fractional and implied probability
    Convert {
        /// Odds value, e.g. 2.5, +150, -110, 3/2 or 40%
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Input format: decimal, american, fractional or probability
        #[arg(short, long, default_value = "decimal")]
        format: OddsFormat,
    },

    /// Expected value of a bet
    Ev {
        /// Amount staked
        #[arg(short, long, default_value = "100")]
        stake: f64,

        /// Decimal odds
        #[arg(short, long)]
        odds: f64,

        /// Your estimated win probability in percent
        #[arg(short, long)]
        probability: f64,
    },

    /// Kelly criterion stake
    Kelly {
        /// Decimal odds
        #[arg(short, long)]
        odds: f64,

        /// Your estimated win probability in percent
        #[arg(short, long)]
        probability: f64,

        /// Bankroll amount
        #[arg(short, long, default_value = "1000")]
        bankroll: f64,

        /// Kelly multiplier (0.25 = quarter Kelly)
        #[arg(long)]
        multiplier: Option<f64>,
    },

    /// Overround of a market from its decimal odds
    Overround {
        /// Decimal odds of every outcome
        #[arg(required = true, num_args = 1..)]
        odds: Vec<f64>,
    },

    /// Price an outcome with a bookmaker margin
    Margin {
        /// True probability in percent
        #[arg(short, long, default_value = "50")]
        probability: f64,

        /// Bookmaker margin in percent
        #[arg(short, long, default_value = "5")]
        margin: f64,
    },

    /// Quick analysis of a quoted price without your own probability estimate
    Quote {
        /// Amount staked
        #[arg(short, long, default_value = "100")]
        stake: f64,

        /// Decimal odds
        #[arg(short, long)]
        odds: f64,
    },

    /// Take a betting-myths quiz
    Quiz {
        /// basic, advanced or expert
        #[arg(short, long, default_value = "basic")]
        difficulty: Difficulty,
    },

    /// Assess your betting risk profile
    Risk,

    /// Bet play money on simulated games
    Play {
        /// Place this many bets automatically instead of prompting
        #[arg(long)]
        bets: Option<usize>,

        /// Sport for automatic bets
        #[arg(long, default_value = "football")]
        sport: Sport,

        /// Decimal odds for automatic bets
        #[arg(long, default_value = "2.0")]
        odds: f64,

        /// Stake for automatic bets
        #[arg(long, default_value = "50")]
        amount: f64,
    },

    /// Project a betting habit against saving or investing the money
    Project {
        /// Amount per bet
        #[arg(short, long, default_value = "20")]
        amount: f64,

        /// daily, weekly or monthly
        #[arg(short, long, default_value = "weekly")]
        frequency: Frequency,

        /// Duration in months
        #[arg(short, long, default_value = "3")]
        months: u32,

        /// Win rate in percent
        #[arg(short, long, default_value = "45")]
        win_rate: f64,

        /// Average decimal odds
        #[arg(short, long, default_value = "2.0")]
        odds: f64,

        /// Annual savings interest in percent
        #[arg(long, default_value = "2")]
        savings_rate: f64,

        /// Annual investment return in percent
        #[arg(long, default_value = "7")]
        investment_rate: f64,
    },

    /// Simulate how a house edge grinds down a balance
    HouseEdge {
        /// House edge in percent
        #[arg(short, long, default_value = "5")]
        edge: f64,

        /// Number of bets per run
        #[arg(short, long, default_value = "100")]
        bets: usize,

        /// Amount per bet (defaults to the configured amount)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Runs for the final-balance distribution
        #[arg(long)]
        runs: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::resolve(cli.config.as_deref()).context("Failed to load settings")?;
    init_tracing(&settings, cli.verbose)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("{}", "BetAware CLI v0.1.0".cyan().bold());
    println!();

    if cli.interactive {
        run_interactive(&settings, &mut rng)?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Convert { value, format } => convert(format, &value)?,
            Commands::Ev {
                stake,
                odds,
                probability,
            } => expected_value(stake, odds, probability)?,
            Commands::Kelly {
                odds,
                probability,
                bankroll,
                multiplier,
            } => kelly(&settings, odds, probability, bankroll, multiplier)?,
            Commands::Overround { odds } => overround(&odds)?,
            Commands::Margin { probability, margin } => margin_quote(probability, margin)?,
            Commands::Quote { stake, odds } => quote(&settings, stake, odds)?,
            Commands::Quiz { difficulty } => run_quiz(difficulty)?,
            Commands::Risk => run_risk()?,
            Commands::Play {
                bets: Some(bets),
                sport,
                odds,
                amount,
            } => play_batch(&settings, &mut rng, bets, sport, odds, amount)?,
            Commands::Play { bets: None, .. } => play_interactive(&settings, &mut rng)?,
            Commands::Project {
                amount,
                frequency,
                months,
                win_rate,
                odds,
                savings_rate,
                investment_rate,
            } => {
                let inputs = ProjectionInputs {
                    bet_amount: amount,
                    frequency,
                    months,
                    win_probability: win_rate / 100.0,
                    odds,
                    savings_rate: savings_rate / 100.0,
                    investment_rate: investment_rate / 100.0,
                };
                run_projection(&mut rng, &inputs)?;
            }
            Commands::HouseEdge {
                edge,
                bets,
                amount,
                runs,
            } => {
                let params = HouseEdgeParams {
                    edge: edge / 100.0,
                    bets,
                    bet_amount: amount.unwrap_or(settings.house_edge.bet_amount),
                };
                let runs = runs.unwrap_or(settings.house_edge.distribution_runs);
                run_house_edge(&settings, &mut rng, &params, runs)?;
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn init_tracing(settings: &Settings, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        Level::from_str(&settings.logging.level)
            .with_context(|| format!("Invalid log level: {}", settings.logging.level))?
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;
    Ok(())
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    Ok(pb)
}

fn print_odds_table(odds: &Odds) {
    println!("{:<22} {:>12}", "Format", "Value");
    println!("{}", "-".repeat(36));
    println!("{:<22} {:>12.2}", "Decimal", odds.decimal());
    println!("{:<22} {:>12}", "American", odds.american_display());
    let fractional = odds
        .fractional()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    println!("{:<22} {:>12}", "Fractional", fractional);
    println!(
        "{:<22} {:>11.1}%",
        "Implied probability",
        odds.implied_probability() * 100.0
    );
}

fn convert(format: OddsFormat, value: &str) -> Result<()> {
    let odds = Odds::parse(format, value)
        .with_context(|| format!("Could not read {:?} as {} odds", value, format))?;

    println!("{}: {} ({})", "Converting".green(), value, format);
    println!();
    print_odds_table(&odds);
    Ok(())
}

fn expected_value(stake: f64, odds: f64, probability_pct: f64) -> Result<()> {
    let result = evaluate(EvInputs {
        stake,
        decimal_odds: odds,
        win_probability: probability_pct / 100.0,
    })?;

    println!("{}", "Expected Value:".yellow().bold());
    println!("{}", "-".repeat(40));
    println!("{:<26} {:>12.2}", "Stake", stake);
    println!("{:<26} {:>12.2}", "Potential profit", result.potential_profit);
    println!(
        "{:<26} {:>11.1}%",
        "Break-even probability",
        result.break_even_probability * 100.0
    );
    println!("{:<26} {:>11.1}%", "Your probability", probability_pct);
    println!("{:<26} {:>11.1}%", "Edge", result.edge * 100.0);

    let ev = format!("{:+.2}", result.expected_value);
    let roi = format!("{:+.1}%", result.roi * 100.0);
    if result.is_positive() {
        println!("{:<26} {:>12}", "Expected value", ev.green());
        println!("{:<26} {:>12}", "ROI", roi.green());
    } else {
        println!("{:<26} {:>12}", "Expected value", ev.red());
        println!("{:<26} {:>12}", "ROI", roi.red());
    }
    println!();

    if result.is_positive() {
        println!("{} This bet has positive expected value at your estimate.", "→".green());
    } else {
        println!(
            "{} This bet loses {:.2} per {:.0} staked on average.",
            "→".red(),
            result.expected_value.abs(),
            stake
        );
    }
    Ok(())
}

fn kelly(
    settings: &Settings,
    odds: f64,
    probability_pct: f64,
    bankroll: f64,
    multiplier: Option<f64>,
) -> Result<()> {
    let calc = KellyCalculator::new(
        bankroll,
        multiplier.unwrap_or(settings.kelly.multiplier),
        settings.kelly.max_stake_pct,
    );
    let sizing = calc.calculate_single(odds, probability_pct / 100.0)?;

    println!("{}", "Kelly Criterion:".yellow().bold());
    println!("{}", "-".repeat(40));
    println!("{:<26} {:>12.2}", "Bankroll", bankroll);
    println!("{:<26} {:>12.3}", "EV per unit", sizing.expected_value);
    println!("{:<26} {:>11.1}%", "Full Kelly", sizing.kelly_fraction * 100.0);
    println!(
        "{:<26} {:>11.1}%",
        "Recommended",
        sizing.recommended_fraction * 100.0
    );
    println!("{:<26} {:>12.2}", "Stake", sizing.stake);
    println!();

    if !sizing.has_edge() {
        println!("{}", "No edge at these odds: Kelly says don't bet.".yellow());
    }
    Ok(())
}

fn overround(odds: &[f64]) -> Result<()> {
    let margin = overround_from_decimals(odds)?;
    let implied: Vec<f64> = odds.iter().map(|o| 1.0 / o).collect();
    let fair = fair_probabilities(&implied)?;

    println!("{}", "Market:".yellow().bold());
    println!("{:>8} {:>12} {:>12} {:>10}", "Odds", "Implied", "Fair", "Fair odds");
    println!("{}", "-".repeat(46));
    for ((o, p), f) in odds.iter().zip(&implied).zip(&fair) {
        println!(
            "{:>8.2} {:>11.1}% {:>11.1}% {:>10.2}",
            o,
            p * 100.0,
            f * 100.0,
            1.0 / f
        );
    }
    println!();
    println!("Book total:  {:.1}%", (1.0 + margin) * 100.0);
    println!("Overround:   {}", format!("{:.2}%", margin * 100.0).yellow());
    println!("House edge:  {:.2}%", house_edge(&implied)? * 100.0);
    Ok(())
}

fn margin_quote(probability_pct: f64, margin_pct: f64) -> Result<()> {
    let quote = MarginQuote::new(probability_pct / 100.0, margin_pct / 100.0)?;

    println!("{}", "Bookmaker Margin:".yellow().bold());
    println!("{}", "-".repeat(40));
    println!(
        "{:<26} {:>11.1}%",
        "True probability",
        quote.true_probability * 100.0
    );
    println!(
        "{:<26} {:>11.1}%",
        "Implied probability",
        quote.implied_probability * 100.0
    );
    println!("{:<26} {:>12.2}", "Fair odds", quote.fair_odds);
    println!("{:<26} {:>12.2}", "Bookmaker odds", quote.bookmaker_odds);
    println!(
        "{:<26} {:>12}",
        "EV of a 100 bet",
        format!("{:+.2}", quote.expected_value).red()
    );
    println!("{:<26} {:>11.1}%", "ROI", quote.roi() * 100.0);
    Ok(())
}

fn quote(settings: &Settings, stake: f64, odds: f64) -> Result<()> {
    let analysis = QuoteAnalysis::new(stake, odds, settings.quote.true_probability_factor)?;
    let price = Odds::from_decimal(odds)?;

    println!("{}", "Quote Analysis:".yellow().bold());
    println!("{}", "-".repeat(40));
    println!("{:<26} {:>12}", "American", price.american_display());
    println!("{:<26} {:>12.2}", "Potential win", analysis.potential_win);
    println!(
        "{:<26} {:>11.1}%",
        "Implied probability",
        analysis.implied_probability * 100.0
    );
    println!(
        "{:<26} {:>11.1}%",
        "Estimated true chance",
        analysis.estimated_true_probability * 100.0
    );
    let ev = format!("{:+.2}", analysis.expected_value);
    let ev = if analysis.is_positive() { ev.green() } else { ev.red() };
    println!("{:<26} {:>12}", "Expected value", ev);
    Ok(())
}

fn print_question(view: &QuestionView) {
    println!(
        "{} {}/{}   {} {}/{}",
        "Question".yellow().bold(),
        view.number,
        view.total,
        "Score".dimmed(),
        view.score,
        view.attempted
    );
}

fn print_feedback(view: &QuestionView) {
    for option in &view.options {
        let Some(explanation) = &option.explanation else {
            continue;
        };
        match option.state {
            OptionState::Correct => println!("  {} {}", "✓".green(), option.text.green()),
            OptionState::Incorrect => println!("  {} {}", "✗".red(), option.text.red()),
            _ => continue,
        }
        println!("    {}", explanation.dimmed());
    }
    println!();
}

fn print_report(report: &FinalReport) {
    println!("{}", "Quiz Results:".yellow().bold());
    println!(
        "Score: {}/{} ({}%)",
        report.score, report.total, report.percentage
    );
    println!("{}", report.message());
    println!();
    println!("{:>3} {:<50} {:>8}", "#", "Question", "Result");
    println!("{}", "-".repeat(63));
    for result in &report.results {
        let mark = if result.is_correct {
            "correct".green()
        } else {
            "wrong".red()
        };
        println!("{:>3} {:<50} {:>8}", result.number, truncate(&result.question, 50), mark);
        if !result.is_correct {
            println!("    {} {}", "Answer:".dimmed(), result.correct_answer);
        }
    }
    println!();
}

fn run_quiz(difficulty: Difficulty) -> Result<()> {
    let set = builtin(difficulty).context("Failed to load quiz")?;
    let theme = ColorfulTheme::default();

    println!("{}", set.title().green().bold());
    println!("{}", set.description().dimmed());
    println!();

    let mut session = QuizSession::new(set);

    loop {
        match render(&session) {
            DisplayModel::Question(view) => {
                print_question(&view);
                let items: Vec<&str> = view.options.iter().map(|o| o.text.as_str()).collect();
                let choice = Select::with_theme(&theme)
                    .with_prompt(view.prompt.as_str())
                    .items(&items)
                    .default(0)
                    .interact()?;

                session.select_option(&view.options[choice].id);
                session.submit_answer();

                if let DisplayModel::Question(answered) = render(&session) {
                    print_feedback(&answered);
                }
                session.advance();
            }
            DisplayModel::Completed(report) => {
                print_report(&report);
                let again = Select::with_theme(&theme)
                    .with_prompt("Retake this quiz?")
                    .items(&["No", "Yes"])
                    .default(0)
                    .interact()?
                    == 1;
                if !again {
                    break;
                }
                session.retake();
            }
        }
    }

    Ok(())
}

fn run_risk() -> Result<()> {
    let mut assessment = RiskAssessment::builtin().context("Failed to load risk questions")?;
    let theme = ColorfulTheme::default();

    println!("{}", "Betting Risk Profile".green().bold());
    println!();

    while let Some(question) = assessment.current_question().cloned() {
        println!(
            "{} {}/{}",
            "Question".yellow().bold(),
            assessment.current_index() + 1,
            assessment.len()
        );

        let mut items: Vec<&str> = question.options.iter().map(|o| o.text.as_str()).collect();
        let can_go_back = assessment.current_index() > 0;
        if can_go_back {
            items.push("← Back");
        }
        let default = assessment
            .current_answer()
            .and_then(|points| question.options.iter().position(|o| o.points == points))
            .unwrap_or(0);

        let choice = Select::with_theme(&theme)
            .with_prompt(question.question.as_str())
            .items(&items)
            .default(default)
            .interact()?;

        match question.options.get(choice) {
            Some(option) => {
                assessment.answer(option.points);
                assessment.next();
            }
            None => assessment.back(),
        }
    }

    if let Some(profile) = assessment.result() {
        println!();
        println!("{}", "Your Risk Profile:".yellow().bold());
        println!(
            "Score: {}/{} ({:.0}%)",
            profile.score, profile.max_score, profile.percentage
        );
        let level = profile.level.to_string();
        let level = if profile.suggests_specialist() {
            level.red().bold()
        } else {
            level.green().bold()
        };
        println!("Level: {}", level);
        println!();
        println!("{}", profile.level.description());
        println!("{} {}", "Advice:".bold(), profile.level.advice());
        if profile.suggests_specialist() {
            println!();
            println!(
                "{}",
                "Consider speaking with a gambling support specialist.".yellow()
            );
        }
    }

    Ok(())
}

fn odds_label(odds: f64) -> String {
    let american = Odds::from_decimal(odds)
        .map(|o| format_american(o.american()))
        .unwrap_or_else(|_| "-".to_string());
    format!("{:.2} ({})", odds, american)
}

fn print_insights(sim: &VirtualSimulator, stake: f64, odds: f64) {
    let insights = sim.insights(stake, odds);
    if insights.is_empty() {
        return;
    }
    println!("{}", "Insights:".yellow().bold());
    for insight in insights {
        println!("  {} {}", "•".cyan(), insight);
    }
    println!();
}

fn print_sim_summary(sim: &VirtualSimulator) {
    let metrics = sim.metrics();
    println!("{}", "Session Summary:".yellow().bold());
    println!("{}", "-".repeat(40));
    println!("{:<26} {:>12}", "Bets", metrics.total_bets);
    println!("{:<26} {:>11.1}%", "Hit rate", metrics.hit_rate * 100.0);
    println!("{:<26} {:>12.2}", "Total staked", metrics.total_staked);
    println!("{:<26} {:>12.2}", "Net profit", metrics.net_profit);
    println!("{:<26} {:>11.1}%", "ROI", metrics.roi * 100.0);
    println!("{:<26} {:>12.2}", "Max drawdown", metrics.max_drawdown);
    println!(
        "{:<26} {:>12}",
        "Longest losing streak", metrics.longest_losing_streak
    );
    println!("{:<26} {:>12.2}", "Balance", sim.balance());
    println!();
}

fn play_batch(
    settings: &Settings,
    rng: &mut StdRng,
    bets: usize,
    sport: Sport,
    odds: f64,
    amount: f64,
) -> Result<()> {
    let mut sim = VirtualSimulator::new(settings.simulator.clone());
    println!(
        "{}: {} bets of {:.2} on {} at {}",
        "Simulating".green(),
        bets,
        amount,
        sport,
        odds_label(odds)
    );
    println!();

    for _ in 0..bets {
        if let Err(e) = sim.place_bet(rng, amount, odds, sport) {
            println!("{}: {}", "Stopped".yellow(), e);
            break;
        }
    }

    print_sim_summary(&sim);
    print_insights(&sim, amount, odds);
    Ok(())
}

fn play_interactive(settings: &Settings, rng: &mut StdRng) -> Result<()> {
    let mut sim = VirtualSimulator::new(settings.simulator.clone());
    let theme = ColorfulTheme::default();
    let sport_items: Vec<String> = Sport::ALL.iter().map(|s| s.to_string()).collect();
    let odds_items: Vec<String> = ODDS_CHOICES.iter().map(|&o| odds_label(o)).collect();

    println!("{}", "Play-Money Simulator".green().bold());
    println!("{}", "Outcomes use realistic win rates for each sport.".dimmed());
    println!();

    loop {
        println!("{} {:.2}", "Balance:".bold(), sim.balance());

        let options = ["Place a bet", "Show history", "Reset", "Done"];
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let sport = Sport::ALL[Select::with_theme(&theme)
                    .with_prompt("Sport")
                    .items(&sport_items)
                    .default(0)
                    .interact()?];
                let odds = ODDS_CHOICES[Select::with_theme(&theme)
                    .with_prompt("Odds")
                    .items(&odds_items)
                    .default(2)
                    .interact()?];
                let amount: f64 = Input::with_theme(&theme)
                    .with_prompt("Stake")
                    .default(50.0)
                    .interact_text()?;

                match sim.place_bet(rng, amount, odds, sport) {
                    Ok(bet) => {
                        let outcome = if bet.won {
                            format!("Won {:+.2}", bet.payout).green()
                        } else {
                            format!("Lost {:.2}", bet.payout.abs()).red()
                        };
                        println!("{}  (balance {:.2})", outcome, bet.balance_after);
                        println!();
                    }
                    Err(e) => {
                        println!("{}: {}", "Bet rejected".red(), e);
                        println!();
                        continue;
                    }
                }
                print_insights(&sim, amount, odds);
            }
            1 => {
                if sim.history().is_empty() {
                    println!("{}", "No bets yet.".dimmed());
                    println!();
                    continue;
                }
                println!(
                    "{:>4} {:<12} {:>8} {:>6} {:>10} {:>10}",
                    "#", "Sport", "Stake", "Odds", "Result", "Balance"
                );
                println!("{}", "-".repeat(55));
                for bet in sim.history().iter().rev().take(10) {
                    let result = format!("{:+.2}", bet.payout);
                    let result = if bet.won { result.green() } else { result.red() };
                    println!(
                        "{:>4} {:<12} {:>8.2} {:>6.2} {:>10} {:>10.2}",
                        bet.id,
                        bet.sport.to_string(),
                        bet.amount,
                        bet.odds,
                        result,
                        bet.balance_after
                    );
                }
                println!();
                print_sim_summary(&sim);
            }
            2 => {
                sim.reset();
                println!("{}", "Balance reset.".green());
                println!();
            }
            _ => {
                print_sim_summary(&sim);
                break;
            }
        }
    }

    Ok(())
}

fn run_projection(rng: &mut StdRng, inputs: &ProjectionInputs) -> Result<()> {
    let projection = project(rng, inputs)?;

    println!(
        "{}: {:.2} {} for {} months",
        "Projecting".green(),
        inputs.bet_amount,
        inputs.frequency,
        inputs.months
    );
    println!();
    println!(
        "{:>8} {:>12} {:>12} {:>12}",
        "Month", "Betting", "Saving", "Investing"
    );
    println!("{}", "-".repeat(47));
    for point in &projection.points {
        let label = if point.month == 0 {
            "Start".to_string()
        } else {
            point.month.to_string()
        };
        println!(
            "{:>8} {:>12.2} {:>12.2} {:>12.2}",
            label, point.betting, point.saving, point.investing
        );
    }
    println!();

    println!("{:<28} {:>12}", "Total bets", projection.total_bets);
    println!("{:<28} {:>12.2}", "Total spent", projection.total_spent);
    println!("{:<28} {:>12.2}", "Betting result", projection.final_betting);
    println!("{:<28} {:>12.2}", "Expected betting result", projection.expected_betting);
    println!("{:<28} {:>12.2}", "Savings balance", projection.final_saving);
    println!("{:<28} {:>12.2}", "Investment balance", projection.final_investing);
    println!(
        "{:<28} {:>12}",
        "Opportunity cost",
        format!("{:.2}", projection.opportunity_cost()).yellow()
    );
    Ok(())
}

fn run_house_edge(
    settings: &Settings,
    rng: &mut StdRng,
    params: &HouseEdgeParams,
    runs: usize,
) -> Result<()> {
    let run = edge_sim::simulate(rng, params)?;

    println!(
        "{}: {} bets of {:.2} with a {:.1}% house edge",
        "Simulating".green(),
        params.bets,
        params.bet_amount,
        params.edge * 100.0
    );
    println!();
    println!("{:<28} {:>11.2}%", "Win probability", params.win_probability() * 100.0);
    println!(
        "{:<28} {:>12.2}",
        "Expected per bet",
        edge_sim::expected_value_per_bet(params.bet_amount, params.edge)
    );
    println!("{:<28} {:>12.2}", "Theoretical loss", params.theoretical_loss());
    let final_balance = format!("{:.2}", run.final_balance());
    let final_balance = if run.final_balance() >= 0.0 {
        final_balance.green()
    } else {
        final_balance.red()
    };
    println!("{:<28} {:>12}", "Final balance", final_balance);
    println!("{:<28} {:>12.2}", "Peak", run.peak());
    println!("{:<28} {:>12.2}", "Trough", run.trough());
    println!();

    if runs == 0 {
        return Ok(());
    }

    let pb = spinner(&format!("Running {} simulations...", runs))?;
    let buckets = edge_sim::distribution(rng, params, runs, settings.house_edge.bucket_size)?;
    pb.finish_and_clear();
    debug!("Histogram has {} buckets", buckets.len());

    println!("{}", "Final Balance Distribution:".yellow().bold());
    println!("{}", "-".repeat(60));
    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(1);
    for bucket in &buckets {
        let width = bucket.count * 40 / max_count;
        println!(
            "{:>8.0} {:<40} {:>4}",
            bucket.lower,
            "#".repeat(width.max(1)),
            bucket.count
        );
    }
    Ok(())
}

fn run_interactive(settings: &Settings, rng: &mut StdRng) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!();

    let theme = ColorfulTheme::default();

    loop {
        let options = vec![
            "Convert odds",
            "Expected value",
            "Kelly stake",
            "Bookmaker margin",
            "Take a quiz",
            "Risk profile",
            "Play-money simulator",
            "Loss projection",
            "House edge",
            "Quit",
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact()?;

        // Calculator errors are shown and the menu continues
        let outcome = match selection {
            0 => {
                let formats = [
                    OddsFormat::Decimal,
                    OddsFormat::American,
                    OddsFormat::Fractional,
                    OddsFormat::Probability,
                ];
                let format = formats[Select::with_theme(&theme)
                    .with_prompt("Input format")
                    .items(&formats)
                    .default(0)
                    .interact()?];
                let value: String = Input::with_theme(&theme)
                    .with_prompt("Odds")
                    .interact_text()?;
                println!();
                convert(format, &value)
            }
            1 => {
                let stake: f64 = Input::with_theme(&theme)
                    .with_prompt("Stake")
                    .default(100.0)
                    .interact_text()?;
                let odds: f64 = Input::with_theme(&theme)
                    .with_prompt("Decimal odds")
                    .default(2.0)
                    .interact_text()?;
                let probability: f64 = Input::with_theme(&theme)
                    .with_prompt("Your win probability (%)")
                    .default(50.0)
                    .interact_text()?;
                println!();
                expected_value(stake, odds, probability)
            }
            2 => {
                let odds: f64 = Input::with_theme(&theme)
                    .with_prompt("Decimal odds")
                    .default(2.0)
                    .interact_text()?;
                let probability: f64 = Input::with_theme(&theme)
                    .with_prompt("Your win probability (%)")
                    .default(55.0)
                    .interact_text()?;
                let bankroll: f64 = Input::with_theme(&theme)
                    .with_prompt("Bankroll")
                    .default(1000.0)
                    .interact_text()?;
                println!();
                kelly(settings, odds, probability, bankroll, None)
            }
            3 => {
                let probability: f64 = Input::with_theme(&theme)
                    .with_prompt("True probability (%)")
                    .default(50.0)
                    .interact_text()?;
                let margin: f64 = Input::with_theme(&theme)
                    .with_prompt("Bookmaker margin (%)")
                    .default(5.0)
                    .interact_text()?;
                println!();
                margin_quote(probability, margin)
            }
            4 => {
                let difficulty = Difficulty::ALL[Select::with_theme(&theme)
                    .with_prompt("Difficulty")
                    .items(&Difficulty::ALL)
                    .default(0)
                    .interact()?];
                println!();
                run_quiz(difficulty)
            }
            5 => run_risk(),
            6 => play_interactive(settings, rng),
            7 => {
                let bet_amount: f64 = Input::with_theme(&theme)
                    .with_prompt("Amount per bet")
                    .default(20.0)
                    .interact_text()?;
                let frequencies = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];
                let frequency = frequencies[Select::with_theme(&theme)
                    .with_prompt("How often do you bet?")
                    .items(&frequencies)
                    .default(1)
                    .interact()?];
                let months: u32 = Input::with_theme(&theme)
                    .with_prompt("Months")
                    .default(12)
                    .interact_text()?;
                println!();
                let inputs = ProjectionInputs {
                    bet_amount,
                    frequency,
                    months,
                    ..ProjectionInputs::default()
                };
                run_projection(rng, &inputs)
            }
            8 => {
                let edge_pct: f64 = Input::with_theme(&theme)
                    .with_prompt("House edge (%)")
                    .default(5.0)
                    .interact_text()?;
                let bets: usize = Input::with_theme(&theme)
                    .with_prompt("Number of bets")
                    .default(100)
                    .interact_text()?;
                println!();
                let params = HouseEdgeParams {
                    edge: edge_pct / 100.0,
                    bets,
                    bet_amount: settings.house_edge.bet_amount,
                };
                run_house_edge(settings, rng, &params, settings.house_edge.distribution_runs)
            }
            _ => {
                println!("Goodbye!");
                break;
            }
        };

        if let Err(e) = outcome {
            println!("{}: {:#}", "Error".red(), e);
        }
        println!();
    }

    Ok(())
}

/// Truncate text to fit display width
fn truncate(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        text.to_string()
    } else {
        chars[..max_len - 1].iter().collect::<String>() + "…"
    }
}
