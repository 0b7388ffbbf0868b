/// Frame clock for the simulation
///
/// Gameplay advances in fixed ticks of 1/60 s so per-tick constants (0.3 units
/// of tank travel, 1.0 unit of shell travel) stay frame-rate independent,
/// while rendering happens once per redraw.
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second)
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Anything beyond the cap is dropped rather than replayed next frame
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Forget accumulated time, e.g. after a blocking asset load on mode entry
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.last_frame_time = Instant::now();
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert_eq!(game_loop.fps(), 0.0);
    }

    #[test]
    fn test_fixed_timestep() {
        assert!((FIXED_TIMESTEP_DURATION.as_secs_f32() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_tick_accumulation() {
        let mut game_loop = GameLoop::new();
        thread::sleep(FIXED_TIMESTEP_DURATION * 2);

        let ticks = game_loop.begin_frame();
        assert!(ticks >= 1);
        assert!(ticks <= MAX_TICKS_PER_FRAME);
        assert_eq!(game_loop.tick_count(), ticks as u64);
    }

    #[test]
    fn test_max_ticks_limit() {
        let mut game_loop = GameLoop::new();

        // Simulate a very long frame (300ms)
        thread::sleep(Duration::from_millis(300));

        let ticks = game_loop.begin_frame();
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);

        // The backlog was dropped, so an immediate frame has nothing left to run
        assert_eq!(game_loop.begin_frame(), 0);
    }

    #[test]
    fn test_reset_discards_backlog() {
        let mut game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(50));

        game_loop.reset();
        assert_eq!(game_loop.begin_frame(), 0);
    }

    #[test]
    fn test_fps_reported_after_ten_frames() {
        let mut game_loop = GameLoop::new();
        for _ in 0..10 {
            thread::sleep(Duration::from_millis(2));
            game_loop.begin_frame();
        }
        assert!(game_loop.fps() > 0.0);
    }
}
