use super::types::PriceComparison;

/// Placeholder until a real price source is wired in; the id is ignored.
pub fn price_comparison(_imdb_id: &str) -> PriceComparison {
    PriceComparison {
        buy: "Buy this movie for $14.99!".to_string(),
        rent: "Rent this movie for $4.99!".to_string(),
        stream: "Stream this movie on a subscription service!".to_string(),
    }
}
