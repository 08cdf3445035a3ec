#![allow(dead_code)]

use readymatch::models::Candidate;

/// Build candidates from bare names
pub fn candidates(names: &[&str]) -> Vec<Candidate> {
    names.iter().map(|name| Candidate::new(*name)).collect()
}

/// A results page as the scraper delivers it for "John Smith"
pub fn john_smith_results() -> Vec<Candidate> {
    vec![
        Candidate::new("SMITH, JOHN").with_location("NSW 2000"),
        Candidate::new("JOHN SMITH").with_location("VIC 3000"),
        Candidate::new("JOHN MICHAEL SMITH").with_location("QLD 4000"),
        Candidate::new("JONATHAN SMITH").with_additional_info("Date of Birth: 1975"),
        Candidate::new("MARY JONES"),
        Candidate::new("JOHN SMITHERS"),
        Candidate::new("DR JOHN SMITH JR").with_location("WA 6000"),
    ]
}

/// Names that appear on real pages with odd formatting
pub fn awkward_names() -> Vec<&'static str> {
    vec![
        "",
        " ",
        "\t\n",
        "???",
        "Mr.",
        "<td></td>",
        "JOHN   SMITH",
        "o'brien-smith",
        "José García",
        "名前 テスト",
        "A B C D E F G H I J",
        "Jr. Sr. III",
    ]
}
