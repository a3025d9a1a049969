use ratemeter::{MeterConfig, RateMode, Skill, Tracker};

fn main() {
    let mut tracker = Tracker::new();
    let skills = [(Skill::Mining, 35), (Skill::Fishing, 20), (Skill::Cooking, 90)];
    let mut totals = [0_i64; 3];

    for (skill, _) in skills {
        let _ = tracker.record(skill, 0);
    }

    let ticks: u64 = std::env::var("TICKS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(600);

    for tick in 1..=ticks {
        tracker.advance();
        for (index, (skill, gain)) in skills.iter().enumerate() {
            // each skill gains on its own cadence
            if tick % (index as u64 + 3) == 0 {
                totals[index] += gain;
                let _ = tracker.record(*skill, totals[index]);
            }
        }
    }

    for mode in [RateMode::Cumulative, RateMode::SlidingWindow] {
        let config = MeterConfig {
            tracking_mode: mode,
            ..MeterConfig::default()
        };
        let aggregate = tracker.aggregate(&config.sampling());
        println!("{} after {} ticks:", mode.label(), tracker.current_time());
        for skill in aggregate.ranking.iter().rev() {
            println!("  {:<10} {:>8} xp/h", skill.name(), aggregate.latest_rate(*skill));
        }
        let performance = aggregate.performance;
        println!(
            "  compute {:?}, cache {} entries ({} hits, {} misses)",
            performance.compute_time,
            performance.cache_size,
            performance.cache_hits,
            performance.cache_misses
        );
    }

    match tracker.export().to_json() {
        Ok(json) => println!("snapshot: {} bytes", json.len()),
        Err(err) => eprintln!("snapshot failed: {err}"),
    }
}
