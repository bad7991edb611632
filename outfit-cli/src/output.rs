use std::fmt::Write;

use outfit_core::RecommendationResponse;

/// Human-readable rendering of a recommendation.
pub fn render(response: &RecommendationResponse) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} (score {}/15), feels like {:.1} °C",
        response.category, response.clothing_score, response.effective_temp_c
    );

    let lists = &response.recommendations;
    section(&mut out, "Option A", &lists.male, response);
    section(&mut out, "Option B", &lists.female, response);
    if !lists.accessories.is_empty() {
        section(&mut out, "Accessories", &lists.accessories, response);
    }

    out
}

fn section(out: &mut String, title: &str, items: &[String], response: &RecommendationResponse) {
    let _ = writeln!(out, "\n{title}:");
    for item in items {
        match response.images.as_ref().and_then(|images| images.get(item)) {
            Some(urls) if !urls.is_empty() => {
                let _ = writeln!(out, "  - {item}");
                for url in urls {
                    let _ = writeln!(out, "      {url}");
                }
            }
            Some(_) => {
                let _ = writeln!(out, "  - {item} (no pictures found)");
            }
            None => {
                let _ = writeln!(out, "  - {item}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outfit_core::evaluate;
    use std::collections::BTreeMap;

    #[test]
    fn renders_heading_and_lists() {
        let response = RecommendationResponse::from(evaluate(32.0, 70.0, 8.0, 10.0).unwrap());
        let text = render(&response);

        assert!(text.starts_with("Very Hot (score 1/15), feels like 32.6 °C\n"));
        assert!(text.contains("\nOption A:\n  - Tank top / Vest\n"));
        assert!(text.contains("\nOption B:\n  - Tank top / Sundress\n"));
        assert!(text.contains("\nAccessories:\n  - Consider Sunscreen\n"));
    }

    #[test]
    fn skips_empty_accessories() {
        let response = RecommendationResponse::from(evaluate(27.0, 40.0, 0.0, 0.0).unwrap());
        assert!(!render(&response).contains("Accessories"));
    }

    #[test]
    fn shows_pictures_when_looked_up() {
        let images = BTreeMap::from([
            ("T-shirt".to_string(), vec!["https://img.test/t.jpg".to_string()]),
            ("Sneakers / Sandals".to_string(), Vec::new()),
        ]);
        let response =
            RecommendationResponse::from(evaluate(27.0, 40.0, 0.0, 0.0).unwrap()).with_images(images);
        let text = render(&response);

        assert!(text.contains("  - T-shirt\n      https://img.test/t.jpg\n"));
        assert!(text.contains("  - Sneakers / Sandals (no pictures found)\n"));
    }
}
