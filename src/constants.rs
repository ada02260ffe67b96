// Chunk grid constants
pub const CHUNK_SIZE: i32 = 16;
pub const HALF_CHUNK_SIZE: i32 = CHUNK_SIZE / 2;
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
// Keeps chunk keys non-negative over the playable range (about +-500 chunks)
pub const GRID_OFFSET: i32 = 500;

// Streaming constants
pub const MAX_CHUNKS: usize = 100;
pub const VIEW_RADIUS: i32 = 1;

// Terrain constants
pub const NOISE_SCALE: f32 = 100.0;
pub const HEIGHT_SCALE: f32 = 10.0;

// Ground query constants
pub const EYE_OFFSET: f32 = 2.0;
pub const GROUND_RAY_LENGTH: f32 = 10.0;

// Material slots of the grass cube (side, top, bottom)
pub const MATERIAL_SIDE: f32 = 0.0;
pub const MATERIAL_TOP: f32 = 1.0;
pub const MATERIAL_BOTTOM: f32 = 2.0;

// Merged cube geometry
pub const VERTICES_PER_CUBE: usize = 24;
pub const INDICES_PER_CUBE: usize = 36;
