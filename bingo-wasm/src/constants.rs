/// How long a render waits for item images before drawing without them (ms).
pub const IMAGE_DEADLINE_MS: i32 = 8000;
