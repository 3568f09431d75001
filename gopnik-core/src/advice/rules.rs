use async_trait::async_trait;

use crate::{
    advice::AdviceStrategy,
    error::ResolutionFailure,
    model::{AdviceResult, WeatherSnapshot},
};

/// The deterministic strategy: fixed thresholds, fixed wording, no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAdvice;

/// Compose the advice sentence for a snapshot.
///
/// Clause order is fixed: precipitation, then the temperature band, then
/// wind. Boundary values belong to the lower band (`0°C` is jacket weather,
/// not warm-jacket weather) and the wind comparison is strict, so exactly
/// `10 m/s` stays scarf-free.
pub fn clothing_advice(snapshot: &WeatherSnapshot) -> String {
    let mut clauses: Vec<&str> = Vec::new();

    if snapshot.precipitation_mm > 0.0 {
        clauses.push("carry an umbrella or hood");
    }

    clauses.push(temperature_clause(snapshot.temperature_c));

    if snapshot.wind_speed_ms > 10.0 {
        clauses.push("it's windy, a scarf will help");
    }

    clauses.join(" and ")
}

fn temperature_clause(temperature_c: f64) -> &'static str {
    if temperature_c < -10.0 {
        "wear a fur coat, it's brutally cold"
    } else if temperature_c < 0.0 {
        "zip up a warm jacket"
    } else if temperature_c < 10.0 {
        "don't forget a jacket"
    } else if temperature_c < 20.0 {
        "a light sweater will do"
    } else {
        "a t-shirt is fine"
    }
}

#[async_trait]
impl AdviceStrategy for RuleBasedAdvice {
    async fn advise(
        &self,
        snapshot: &WeatherSnapshot,
    ) -> Result<AdviceResult, ResolutionFailure> {
        Ok(AdviceResult { text: clothing_advice(snapshot) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temperature_c: f64, precipitation_mm: f64, wind_speed_ms: f64) -> WeatherSnapshot {
        WeatherSnapshot { temperature_c, precipitation_mm, wind_speed_ms }
    }

    const TEMPERATURE_CLAUSES: [&str; 5] = [
        "wear a fur coat, it's brutally cold",
        "zip up a warm jacket",
        "don't forget a jacket",
        "a light sweater will do",
        "a t-shirt is fine",
    ];

    #[test]
    fn brutal_cold() {
        let advice = clothing_advice(&snapshot(-15.0, 0.0, 5.0));
        assert_eq!(advice, "wear a fur coat, it's brutally cold");
    }

    #[test]
    fn rainy_windy_autumn_day_stacks_all_three_clauses() {
        let advice = clothing_advice(&snapshot(5.0, 2.0, 12.0));
        assert_eq!(
            advice,
            "carry an umbrella or hood and don't forget a jacket and it's windy, a scarf will help"
        );
    }

    #[test]
    fn warm_calm_day() {
        let advice = clothing_advice(&snapshot(25.0, 0.0, 3.0));
        assert_eq!(advice, "a t-shirt is fine");
    }

    #[test]
    fn every_temperature_selects_exactly_one_band() {
        let temps = [
            -40.0, -10.01, -10.0, -9.99, -0.1, 0.0, 0.1, 9.99, 10.0, 15.0, 19.99, 20.0, 35.0,
        ];

        for t in temps {
            let advice = clothing_advice(&snapshot(t, 0.0, 0.0));
            let matched: Vec<_> =
                TEMPERATURE_CLAUSES.iter().filter(|c| advice.contains(**c)).collect();
            assert_eq!(matched.len(), 1, "temperature {t} matched {matched:?}");
        }
    }

    #[test]
    fn boundaries_belong_to_the_lower_band() {
        assert_eq!(clothing_advice(&snapshot(-10.0, 0.0, 0.0)), "zip up a warm jacket");
        assert_eq!(clothing_advice(&snapshot(0.0, 0.0, 0.0)), "don't forget a jacket");
        assert_eq!(clothing_advice(&snapshot(10.0, 0.0, 0.0)), "a light sweater will do");
        assert_eq!(clothing_advice(&snapshot(20.0, 0.0, 0.0)), "a t-shirt is fine");
    }

    #[test]
    fn wind_comparison_is_strict() {
        assert!(!clothing_advice(&snapshot(15.0, 0.0, 10.0)).contains("scarf"));
        assert!(clothing_advice(&snapshot(15.0, 0.0, 10.01)).contains("scarf"));
    }

    #[test]
    fn no_precipitation_means_no_umbrella() {
        assert!(!clothing_advice(&snapshot(15.0, 0.0, 0.0)).contains("umbrella"));
        assert!(clothing_advice(&snapshot(15.0, 0.1, 0.0)).contains("umbrella"));
    }

    #[test]
    fn clause_order_is_precipitation_then_temperature_then_wind() {
        let advice = clothing_advice(&snapshot(-20.0, 1.0, 20.0));

        let umbrella = advice.find("umbrella").expect("umbrella clause expected");
        let coat = advice.find("fur coat").expect("temperature clause expected");
        let scarf = advice.find("scarf").expect("wind clause expected");

        assert!(umbrella < coat);
        assert!(coat < scarf);
    }

    #[tokio::test]
    async fn strategy_is_deterministic() {
        let strategy = RuleBasedAdvice;
        let snap = snapshot(3.0, 1.0, 11.0);

        let first = strategy.advise(&snap).await.expect("rule-based advice never fails");
        let second = strategy.advise(&snap).await.expect("rule-based advice never fails");

        assert_eq!(first, second);
    }
}
