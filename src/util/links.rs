//! Marketplace search links for a movie title.

pub fn amazon_search_link(title: &str) -> String {
    format!("https://www.amazon.com/s?k={}+movie", urlencoding::encode(title))
}

pub fn ebay_search_link(title: &str) -> String {
    format!(
        "https://www.ebay.com/sch/i.html?_nkw={}+movie",
        urlencoding::encode(title)
    )
}
