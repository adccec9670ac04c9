use policy::Frame;

use crate::env::{Action, Env};

const HEIGHT: usize = 210;
const WIDTH: usize = 160;
const CHANNELS: usize = 3;

// Playfield band, inside the preprocessor's crop.
const PLAY_TOP: i32 = 36;
const PLAY_BOTTOM: i32 = 193;

const PADDLE_X: i32 = 140;
const PADDLE_HEIGHT: i32 = 16;
const PADDLE_SPEED: i32 = 3;
const BALL_SIZE: i32 = 2;

const BACKGROUND: u8 = 144;
const SCORE_BAND: u8 = 109;
const PADDLE_COLOR: u8 = 92;
const BALL_COLOR: u8 = 236;

const POINTS_PER_GAME: u32 = 5;
const MAX_STEPS: u32 = 10_000;

/// Minimal built-in paddle-and-ball environment.
///
/// Emits raw 210x160x3 frames with the palette and band layout the default
/// preprocessor geometry expects. The agent controls the right-hand paddle;
/// the left wall returns every ball. A ball that reaches the left wall
/// scores +1 for the agent, a ball that slips past the paddle scores -1,
/// and an episode ends after a fixed number of points. This is a stand-in
/// for driving the trainer end to end, not a faithful port of the game.
pub struct PaddleEnv {
    ball_y: i32,
    ball_x: i32,
    vel_y: i32,
    vel_x: i32,
    paddle_y: i32,
    points: u32,
    steps: u32,
    serve_count: u32,
    rng: fastrand::Rng,
}

impl PaddleEnv {
    pub fn new(seed: u64) -> Self {
        let mut env = Self {
            ball_y: 0,
            ball_x: 0,
            vel_y: 0,
            vel_x: 0,
            paddle_y: 0,
            points: 0,
            steps: 0,
            serve_count: 0,
            rng: fastrand::Rng::with_seed(seed),
        };
        env.reset_state();
        env
    }

    fn reset_state(&mut self) {
        self.points = 0;
        self.steps = 0;
        self.paddle_y = (PLAY_TOP + PLAY_BOTTOM) / 2 - PADDLE_HEIGHT / 2;
        self.serve();
    }

    fn serve(&mut self) {
        self.ball_y = (PLAY_TOP + PLAY_BOTTOM) / 2;
        self.ball_x = WIDTH as i32 / 2;
        // Alternate serve direction so neither side is favored.
        self.vel_x = if self.serve_count % 2 == 0 { -2 } else { 2 };
        self.vel_y = if self.rng.bool() { 1 } else { -1 };
        self.serve_count += 1;
    }

    fn frame(&self) -> Frame {
        let mut frame = Frame::filled(HEIGHT, WIDTH, CHANNELS, BACKGROUND);
        for y in 0..24 {
            for x in 0..WIDTH {
                frame.put(y, x, SCORE_BAND);
            }
        }
        for y in self.paddle_y..self.paddle_y + PADDLE_HEIGHT {
            for x in PADDLE_X..PADDLE_X + 2 {
                frame.put(y as usize, x as usize, PADDLE_COLOR);
            }
        }
        for dy in 0..BALL_SIZE {
            for dx in 0..BALL_SIZE {
                let y = (self.ball_y + dy).clamp(0, HEIGHT as i32 - 1);
                let x = (self.ball_x + dx).clamp(0, WIDTH as i32 - 1);
                frame.put(y as usize, x as usize, BALL_COLOR);
            }
        }
        frame
    }
}

impl Env for PaddleEnv {
    fn reset(&mut self) -> Frame {
        self.reset_state();
        self.frame()
    }

    fn step(&mut self, action: Action) -> (Frame, f32, bool, bool) {
        self.steps += 1;

        match action {
            Action::Up => self.paddle_y -= PADDLE_SPEED,
            Action::Down => self.paddle_y += PADDLE_SPEED,
        }
        self.paddle_y = self.paddle_y.clamp(PLAY_TOP, PLAY_BOTTOM - PADDLE_HEIGHT);

        self.ball_y += self.vel_y;
        if self.ball_y <= PLAY_TOP || self.ball_y >= PLAY_BOTTOM - BALL_SIZE {
            self.vel_y = -self.vel_y;
            self.ball_y = self.ball_y.clamp(PLAY_TOP, PLAY_BOTTOM - BALL_SIZE);
        }
        self.ball_x += self.vel_x;

        let mut reward = 0.0;
        if self.vel_x > 0 {
            let crossing = self.ball_x + BALL_SIZE >= PADDLE_X && self.ball_x < PADDLE_X + 2;
            let hit = crossing
                && self.ball_y + BALL_SIZE > self.paddle_y
                && self.ball_y < self.paddle_y + PADDLE_HEIGHT;
            if hit {
                self.vel_x = -self.vel_x;
                self.ball_x = PADDLE_X - BALL_SIZE;
                // Deflect by where the ball struck the paddle.
                let offset = self.ball_y - (self.paddle_y + PADDLE_HEIGHT / 2);
                self.vel_y = (self.vel_y + offset.signum()).clamp(-2, 2);
                if self.vel_y == 0 {
                    self.vel_y = if self.rng.bool() { 1 } else { -1 };
                }
            } else if self.ball_x >= WIDTH as i32 - BALL_SIZE {
                reward = -1.0;
                self.points += 1;
                self.serve();
            }
        } else if self.ball_x <= 0 {
            reward = 1.0;
            self.points += 1;
            self.serve();
        }

        let done = self.points >= POINTS_PER_GAME;
        let truncated = self.steps >= MAX_STEPS;
        (self.frame(), reward, done, truncated)
    }

    fn frame_height(&self) -> usize {
        HEIGHT
    }

    fn frame_width(&self) -> usize {
        WIDTH
    }
}
