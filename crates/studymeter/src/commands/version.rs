pub fn run() -> anyhow::Result<()> {
    println!("studymeter {}", env!("CARGO_PKG_VERSION"));
    println!("Anki progress badges and immersion watch time");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_output() {
        let result = run();
        assert!(result.is_ok());
    }
}
