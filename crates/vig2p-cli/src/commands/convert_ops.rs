use std::io::{self, BufRead, Write};
use std::process;

use vig2p_core::{SyllableAnalysis, SyllableCodec};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Convert `texts` joined by spaces, or stdin line by line when empty.
pub fn convert_cmd(codec: &SyllableCodec, texts: &[String]) {
    if !texts.is_empty() {
        println!("{}", codec.to_phonetic(&texts.join(" ")));
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = die!(line, "Error reading stdin: {}");
        die!(
            writeln!(out, "{}", codec.to_phonetic(&line)),
            "Error writing stdout: {}"
        );
    }
}

pub fn explain_cmd(codec: &SyllableCodec, syllable: &str, json: bool) {
    let Some(analysis) = codec.explain(syllable) else {
        eprintln!("Not a syllable: {syllable}");
        process::exit(1);
    };

    if json {
        let text = die!(
            serde_json::to_string_pretty(&analysis),
            "Error serializing analysis: {}"
        );
        println!("{text}");
    } else {
        print_analysis(syllable, &analysis);
    }
}

fn print_analysis(syllable: &str, a: &SyllableAnalysis) {
    let c = &a.components;
    let mark: Vec<String> = a
        .tone
        .mark()
        .chars()
        .map(|m| format!("U+{:04X}", m as u32))
        .collect();

    println!("syllable:  {syllable}");
    println!("initial:   {}", c.initial.as_deref().unwrap_or("-"));
    println!("medial:    {} (base {})", c.medial, a.base_medial);
    println!("final:     {}", c.final_.as_deref().unwrap_or("-"));
    if mark.is_empty() {
        println!("tone:      {}", a.tone);
    } else {
        println!("tone:      {} ({})", a.tone, mark.join(" "));
    }
    println!(
        "ipa:       [{}] [{}] [{}] [{}]",
        a.ipa_initial, a.ipa_medial, a.ipa_final, a.tone_digit
    );
    println!("phonetic:  {}", a.phonetic);
    if c.is_degenerate() {
        println!("note:      empty medial");
    }
}
