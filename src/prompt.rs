use anyhow::{anyhow, Result};

use std::io::{stdin, stdout, Write};

/// Reads one line after printing `question`, failing at end of input
pub fn line(question: &str) -> Result<String> {
    print!("{}", question);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer)
}

/// Asks until the answer starts with y or n
pub fn yes_no(question: &str) -> Result<bool> {
    loop {
        let answer = line(&format!("{} y/n: ", question))?;
        match answer.trim().to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Asks until the answer is a number in `min..=max`
pub fn number(question: &str, min: usize, max: usize) -> Result<usize> {
    loop {
        let answer = line(question)?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (min..=max).contains(&n) => return Ok(n),
            Ok(n) => println!("Please enter a number between {} and {}, not {}.", min, max, n),
            Err(_) => println!("Invalid number: {}", answer.trim()),
        }
    }
}

pub fn pause() -> Result<()> {
    line("\nPress Enter to continue...")?;
    Ok(())
}
