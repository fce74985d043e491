// Author: Dustin Pilgrim
// License: MIT
//
// Pointer scripts, one event per line in view coordinates:
//
//   down 100 0
//   move 150.5 50
//   up            # or: cancel

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Down(f32, f32),
    Move(f32, f32),
    Up,
    Cancel,
}

pub fn load(path: &Path) -> Result<Vec<Step>, String> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read script {}: {e}", path.display()))?;
    parse(&src).map_err(|e| format!("{}: {e}", path.display()))
}

pub fn parse(src: &str) -> Result<Vec<Step>, String> {
    let mut steps = Vec::new();

    for (i, raw) in src.lines().enumerate() {
        let line = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_line(line).map_err(|e| format!("line {}: {e}", i + 1))?;
        steps.push(step);
    }

    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let step = match verb.as_str() {
        "down" => {
            let (x, y) = coords(&verb, &args)?;
            Step::Down(x, y)
        }
        "move" => {
            let (x, y) = coords(&verb, &args)?;
            Step::Move(x, y)
        }
        "up" | "cancel" if !args.is_empty() => {
            return Err(format!("`{verb}` takes no arguments"));
        }
        "up" => Step::Up,
        "cancel" => Step::Cancel,
        other => return Err(format!("unknown event \"{other}\"")),
    };
    Ok(step)
}

fn coords(verb: &str, args: &[&str]) -> Result<(f32, f32), String> {
    let [x, y] = args else {
        return Err(format!("`{verb}` expects X Y, got {} value(s)", args.len()));
    };
    let parse = |s: &str| -> Result<f32, String> {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("bad coordinate \"{s}\""))
    };
    Ok((parse(*x)?, parse(*y)?))
}
