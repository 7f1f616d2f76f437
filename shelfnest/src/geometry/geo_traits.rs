use crate::geometry::Transformation;

/// Exact intersection test between `Self` and `T`, touching counts as colliding.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Geometry that can be moved by a rigid [`Transformation`].
pub trait Transformable: Clone {
    /// In place
    fn transform(&mut self, t: &Transformation) -> &mut Self;

    fn transform_clone(&self, t: &Transformation) -> Self {
        let mut moved = self.clone();
        moved.transform(t);
        moved
    }
}
