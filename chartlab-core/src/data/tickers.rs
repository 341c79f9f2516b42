//! Ticker list parsing.

/// Split a comma-separated ticker list into normalised symbols.
///
/// Trims whitespace, uppercases and drops empty entries. Repeats are kept
/// once, in first-seen order.
pub fn parse_tickers(input: &str) -> Vec<String> {
    let mut tickers: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let ticker = raw.trim().to_uppercase();
        if !ticker.is_empty() && !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    tickers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_and_drops_empties() {
        assert_eq!(parse_tickers(" sber, gazp,, lkoh "), vec!["SBER", "GAZP", "LKOH"]);
    }

    #[test]
    fn empty_input_gives_no_tickers() {
        assert!(parse_tickers("").is_empty());
        assert!(parse_tickers(" , ,").is_empty());
    }

    #[test]
    fn repeats_are_collapsed() {
        assert_eq!(parse_tickers("sber,SBER,Sber"), vec!["SBER"]);
    }
}
