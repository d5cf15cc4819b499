use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use lexicon_core::core::types::VocabularyRecord;
use lexicon_core::quiz::question_words::{generate_rounds, QUESTION_WORDS};
use lexicon_core::quiz::vocab::{check_typed, make_question, Direction};
use lexicon_core::quiz::whats_where;
use lexicon_core::Lexicon;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Multiple choice: Arabizi -> English
    Choice,
    /// Type the English meaning
    Typed,
    /// Match question words
    QuestionWords,
    /// Pick the right preposition
    WhatsWhere,
}

/// Terminal vocabulary quiz. Reads logic.json, never writes it.
#[derive(Parser, Debug)]
#[command(name = "quiz", version)]
struct Args {
    #[arg(long, default_value = "logic.json")]
    data: PathBuf,

    #[arg(long, value_enum, default_value_t = Mode::Choice)]
    mode: Mode,

    /// Number of questions
    #[arg(short = 'n', long, default_value_t = 10)]
    rounds: usize,
}

fn read_line() -> Result<String> {
    print!("\n> ");
    stdout().flush()?;
    let mut input = String::new();
    stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn header(title: &str, score: usize, asked: usize) -> Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", title.bold());
    println!("---------------------------------------------------------------");
    println!("Score: {}/{}   Type 'exit' to stop.\n", score, asked);
    Ok(())
}

fn verdict(ok: bool, right_answer: &str) {
    if ok {
        println!("{}", "Correct!".green());
    } else {
        println!("{} {}", "Not quite, it was".red(), right_answer.yellow());
    }
}

fn pause() -> Result<bool> {
    println!("\n[Enter] to continue");
    Ok(read_line()? != "exit")
}

fn play_choice(items: &[VocabularyRecord], rounds: usize) -> Result<(usize, usize)> {
    let mut rng = rand::thread_rng();
    let (mut score, mut asked) = (0, 0);
    while asked < rounds {
        let Some(q) = make_question(items, Direction::ChatToEnglish, &mut rng) else {
            println!("Not enough vocabulary for a question.");
            break;
        };
        header("Emirati Vocabulary Quiz", score, asked)?;
        println!("What does {} mean?\n", q.prompt.clone().cyan().bold());
        for (i, option) in q.options.iter().enumerate() {
            println!("  {}: {}", i + 1, option);
        }
        let input = read_line()?;
        if input == "exit" {
            break;
        }
        asked += 1;
        let ok = input.parse::<usize>().map_or(false, |n| n > 0 && q.check(n - 1));
        if ok {
            score += 1;
        }
        verdict(ok, &q.options[q.correct]);
        if !pause()? {
            break;
        }
    }
    Ok((score, asked))
}

fn play_typed(items: &[VocabularyRecord], rounds: usize) -> Result<(usize, usize)> {
    let mut rng = rand::thread_rng();
    let (mut score, mut asked) = (0, 0);
    while asked < rounds {
        let Some(q) = make_question(items, Direction::ChatToEnglish, &mut rng) else {
            break;
        };
        let Some(record) = items.iter().find(|r| r.id == q.record) else {
            break;
        };
        header("Type the meaning", score, asked)?;
        println!("{}  ({})", record.chat.clone().cyan().bold(), record.ar);
        let input = read_line()?;
        if input == "exit" {
            break;
        }
        asked += 1;
        let ok = check_typed(record, Direction::ChatToEnglish, &input);
        if ok {
            score += 1;
        }
        verdict(ok, &record.eng);
        if !pause()? {
            break;
        }
    }
    Ok((score, asked))
}

fn play_question_words() -> Result<(usize, usize)> {
    let mut rng = rand::thread_rng();
    let (mut score, mut asked) = (0, 0);
    for round in generate_rounds(&mut rng, 4) {
        header("Match the question words", score, asked)?;
        for (i, &p) in round.prompts.iter().enumerate() {
            println!("  {}: {}", i + 1, QUESTION_WORDS[p].eng);
        }
        println!();
        for (i, &a) in round.answers.iter().enumerate() {
            let word = QUESTION_WORDS[a];
            println!("  {}: {} ({})", (b'a' + i as u8) as char, word.chat.cyan(), word.ar);
        }
        println!("\nAnswer like '1b 2a 3d 4c'");
        let input = read_line()?;
        if input == "exit" {
            break;
        }
        let pairs: Vec<(usize, usize)> = input
            .split_whitespace()
            .filter_map(|tok| {
                let letter = tok.chars().last()?.to_ascii_lowercase();
                let num = &tok[..tok.len() - letter.len_utf8()];
                let p = num.parse::<usize>().ok()?.checked_sub(1)?;
                let a = (letter as usize).checked_sub('a' as usize)?;
                Some((p, a))
            })
            .collect();
        let got = round.score(&pairs);
        score += got;
        asked += round.prompts.len();
        println!("{} of {} right", got, round.prompts.len());
        if !pause()? {
            break;
        }
    }
    Ok((score, asked))
}

fn play_whats_where(rounds: usize) -> Result<(usize, usize)> {
    let mut rng = rand::thread_rng();
    let (mut score, mut asked) = (0, 0);
    for q in whats_where::shuffled(&mut rng).into_iter().take(rounds) {
        header("What's where?", score, asked)?;
        println!("{}\n", q.scene.bold());
        for (i, option) in q.options.iter().enumerate() {
            println!("  {}: {} ({}, {})", i + 1, option.chat().cyan(), option.ar(), option.eng());
        }
        let input = read_line()?;
        if input == "exit" {
            break;
        }
        asked += 1;
        let ok = input.parse::<usize>().map_or(false, |n| n > 0 && q.check(n - 1));
        if ok {
            score += 1;
        }
        verdict(ok, q.answer.chat());
        if !pause()? {
            break;
        }
    }
    Ok((score, asked))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let (score, asked) = match args.mode {
        Mode::QuestionWords => play_question_words()?,
        Mode::WhatsWhere => play_whats_where(args.rounds)?,
        mode => {
            let lexicon = Lexicon::open(&args.data)?;
            if mode == Mode::Typed {
                play_typed(lexicon.items(), args.rounds)?
            } else {
                play_choice(lexicon.items(), args.rounds)?
            }
        }
    };

    println!("\nFinal score: {}", format!("{}/{}", score, asked).bold());
    Ok(())
}
