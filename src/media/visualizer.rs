//! Fake spectrum bars for audio tiles.
//!
//! Each bar picks a new random height on its own fixed interval, so the bars
//! flicker out of step with each other.

use crate::constants::*;
use rand::Rng;

#[derive(Debug, Clone)]
struct Bar {
    height: f32,
    /// Seconds between re-rolls, fixed for the bar's lifetime
    interval: f32,
    elapsed: f32,
}

#[derive(Debug, Clone)]
pub struct AudioVisualizer {
    bars: Vec<Bar>,
    heights: Vec<f32>,
}

fn random_height<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    AUDIO_BAR_MIN_HEIGHT + rng.gen::<f32>() * AUDIO_BAR_HEIGHT_RANGE
}

impl AudioVisualizer {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bars: Vec<Bar> = (0..AUDIO_BAR_COUNT)
            .map(|_| Bar {
                height: random_height(rng),
                interval: AUDIO_BAR_MIN_INTERVAL + rng.gen::<f32>() * AUDIO_BAR_INTERVAL_RANGE,
                elapsed: 0.0,
            })
            .collect();
        let heights = bars.iter().map(|b| b.height).collect();
        Self { bars, heights }
    }

    /// Advance time; returns true if any bar changed height
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        let mut changed = false;
        for (bar, height) in self.bars.iter_mut().zip(self.heights.iter_mut()) {
            bar.elapsed += dt;
            while bar.elapsed >= bar.interval {
                bar.elapsed -= bar.interval;
                bar.height = random_height(rng);
                changed = true;
            }
            *height = bar.height;
        }
        changed
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    #[cfg(test)]
    fn intervals(&self) -> Vec<f32> {
        self.bars.iter().map(|b| b.interval).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn in_height_range(h: f32) -> bool {
        (AUDIO_BAR_MIN_HEIGHT..AUDIO_BAR_MIN_HEIGHT + AUDIO_BAR_HEIGHT_RANGE).contains(&h)
    }

    #[test]
    fn test_eight_bars_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let vis = AudioVisualizer::new(&mut rng);
        assert_eq!(vis.heights().len(), 8);
        assert!(vis.heights().iter().all(|h| in_height_range(*h)));
        assert!(vis
            .intervals()
            .iter()
            .all(|i| (0.2..0.5).contains(i)));
    }

    #[test]
    fn test_no_change_before_shortest_interval() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut vis = AudioVisualizer::new(&mut rng);
        let before = vis.heights().to_vec();
        assert!(!vis.update(0.1, &mut rng));
        assert_eq!(vis.heights(), &before[..]);
    }

    #[test]
    fn test_every_bar_rerolls_after_longest_interval() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut vis = AudioVisualizer::new(&mut rng);
        assert!(vis.update(0.5, &mut rng));
        assert!(vis.heights().iter().all(|h| in_height_range(*h)));
        assert!(vis.bars.iter().all(|b| b.elapsed < b.interval));
    }

    #[test]
    fn test_long_frame_catches_up() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut vis = AudioVisualizer::new(&mut rng);
        vis.update(10.0, &mut rng);
        assert!(vis.bars.iter().all(|b| b.elapsed < b.interval));
    }
}
