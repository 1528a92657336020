//! Output styles example
//!
//! Prints the same sentence in every style, with and without heteronyms,
//! using the built-in demo dictionaries.
//!
//! Run:
//!   cargo run --example styles

use hanpin::{join_slots, Converter, Dictionaries, Options, Style};

fn main() {
    let converter = Converter::with_dict_segmenter(Dictionaries::load_demo());
    let text = "我们在重庆银行, 好人长大!";

    println!("=== {} ===\n", text);
    println!("{:<14} {:<45} {}", "Style", "Primary", "Heteronym");
    println!("{}", "-".repeat(100));

    let styles = [
        Style::Normal,
        Style::Tone,
        Style::Tone2,
        Style::Initials,
        Style::FirstLetter,
    ];
    for style in styles {
        let primary = converter.convert(text, &Options::new(style, false));
        let all = converter.convert(text, &Options::new(style, true));
        println!(
            "{:<14} {:<45} {}",
            format!("{:?}", style),
            join_slots(&primary, " "),
            join_slots(&all, " ")
        );
    }
}
