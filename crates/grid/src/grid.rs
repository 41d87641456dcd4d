//! Sparse scalar grid with a linear index-to-world transform

// standard library
use std::collections::HashMap;

// extrenal crates
use nalgebra::Vector3;

/// Integer voxel coordinate in grid index space
pub type Coord = [i32; 3];

/// Voxels along each side of a leaf, as a power of two
const LEAF_LOG2: i32 = 3;
/// Voxels along each side of a leaf
const LEAF_DIM: i32 = 1 << LEAF_LOG2;
/// Voxels held by a single leaf
const LEAF_SIZE: usize = (LEAF_DIM * LEAF_DIM * LEAF_DIM) as usize;

/// Linear map from index space to world space
///
/// Only axis-aligned scaling and translation are supported:
///
/// ```text
/// world = index * scale + translate
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Voxel size along each axis
    pub scale: Vector3<f64>,
    /// World position of voxel `[0, 0, 0]`
    pub translate: Vector3<f64>,
}

impl Transform {
    /// Transform with the given scale and translation
    pub fn new(scale: Vector3<f64>, translate: Vector3<f64>) -> Self {
        Self { scale, translate }
    }

    /// World space position of a voxel
    ///
    /// ```rust
    /// # use voxmerge_grid::Transform;
    /// # use nalgebra::Vector3;
    /// let transform = Transform::new(Vector3::new(0.5, 1.0, 2.0), Vector3::new(1.0, 0.0, -1.0));
    /// assert_eq!(transform.index_to_world([2, 3, 1]), Vector3::new(2.0, 3.0, 1.0));
    /// ```
    pub fn index_to_world(&self, coord: Coord) -> Vector3<f64> {
        let index = Vector3::new(coord[0] as f64, coord[1] as f64, coord[2] as f64);
        index.component_mul(&self.scale) + self.translate
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::repeat(1.0),
            translate: Vector3::zeros(),
        }
    }
}

/// Fixed size tile of voxels with an activity mask
#[derive(Debug, Clone, PartialEq)]
struct Leaf {
    values: Box<[f32]>,
    active: [u64; LEAF_SIZE / 64],
}

impl Leaf {
    fn new(background: f32) -> Self {
        Self {
            values: vec![background; LEAF_SIZE].into_boxed_slice(),
            active: [0; LEAF_SIZE / 64],
        }
    }

    /// Set a value, returning true if the voxel was not active before
    fn set(&mut self, offset: usize, value: f32) -> bool {
        let (word, bit) = (offset / 64, 1 << (offset % 64));
        let was_inactive = self.active[word] & bit == 0;
        self.active[word] |= bit;
        self.values[offset] = value;
        was_inactive
    }

    fn is_active(&self, offset: usize) -> bool {
        self.active[offset / 64] & (1 << (offset % 64)) != 0
    }
}

/// Sparse grid of `f32` values
///
/// Voxels that have never been written are inactive and read back as the
/// `background` value. Storage is allocated in 8x8x8 leaves on first write,
/// so any coordinate, including negative ones, can be set without knowing
/// the extent up front.
///
/// ```rust
/// # use voxmerge_grid::Grid;
/// let mut grid = Grid::new();
/// grid.set_value([0, 0, 0], 1.0);
/// grid.set_value([9, -3, 2], 2.0);
///
/// assert_eq!(grid.value([9, -3, 2]), 2.0);
/// assert_eq!(grid.value([1, 1, 1]), 0.0);
/// assert_eq!(grid.active_voxel_count(), 2);
/// assert_eq!(grid.bounding_box(), Some(([0, -3, 0], [9, 0, 2])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    name: String,
    transform: Transform,
    background: f32,
    leaves: HashMap<Coord, Leaf>,
    active_count: usize,
}

impl Grid {
    /// Empty grid with a background of `0.0` and identity transform
    pub fn new() -> Self {
        Self::with_background(0.0)
    }

    /// Empty grid with the given background value
    pub fn with_background(background: f32) -> Self {
        Self {
            name: String::new(),
            transform: Transform::default(),
            background,
            leaves: HashMap::new(),
            active_count: 0,
        }
    }

    /// Display name of the grid
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the display name of the grid
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Index-to-world transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Set the transform from a per-axis scale and a translation
    pub fn set_transform(&mut self, scale: Vector3<f64>, translate: Vector3<f64>) {
        self.transform = Transform::new(scale, translate);
    }

    /// Value returned for inactive voxels
    pub fn background(&self) -> f32 {
        self.background
    }

    /// Number of voxels that have been written
    pub fn active_voxel_count(&self) -> usize {
        self.active_count
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    /// Write a value and mark the voxel active
    pub fn set_value(&mut self, coord: Coord, value: f32) {
        let (key, offset) = Self::split(coord);
        let background = self.background;
        let leaf = self
            .leaves
            .entry(key)
            .or_insert_with(|| Leaf::new(background));

        if leaf.set(offset, value) {
            self.active_count += 1;
        }
    }

    /// Value at a voxel, or the background if it is inactive
    pub fn value(&self, coord: Coord) -> f32 {
        let (key, offset) = Self::split(coord);
        self.leaves
            .get(&key)
            .map_or(self.background, |leaf| leaf.values[offset])
    }

    /// Has this voxel been written?
    pub fn is_active(&self, coord: Coord) -> bool {
        let (key, offset) = Self::split(coord);
        self.leaves
            .get(&key)
            .is_some_and(|leaf| leaf.is_active(offset))
    }

    /// Every active voxel and its value, in no particular order
    pub fn iter_active(&self) -> impl Iterator<Item = (Coord, f32)> + '_ {
        self.leaves.iter().flat_map(|(key, leaf)| {
            (0..LEAF_SIZE)
                .filter(move |offset| leaf.is_active(*offset))
                .map(move |offset| (Self::join(*key, offset), leaf.values[offset]))
        })
    }

    /// Inclusive `(min, max)` corners of the active voxels
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        let mut active = self.iter_active().map(|(coord, _)| coord);
        let first = active.next()?;

        Some(active.fold((first, first), |(mut lo, mut hi), c| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(c[axis]);
                hi[axis] = hi[axis].max(c[axis]);
            }
            (lo, hi)
        }))
    }

    /// Leaf key and the offset of the voxel within that leaf
    fn split(coord: Coord) -> (Coord, usize) {
        let key = coord.map(|c| c >> LEAF_LOG2);
        let local = coord.map(|c| (c & (LEAF_DIM - 1)) as usize);
        let dim = LEAF_DIM as usize;
        (key, (local[0] * dim + local[1]) * dim + local[2])
    }

    /// Inverse of [split()](Grid::split)
    fn join(key: Coord, offset: usize) -> Coord {
        let dim = LEAF_DIM as usize;
        let local = [offset / (dim * dim), (offset / dim) % dim, offset % dim];
        [0usize, 1, 2].map(|axis| (key[axis] << LEAF_LOG2) + local[axis] as i32)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
