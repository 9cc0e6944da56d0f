//! Instance buffer that grows to fit whatever is written to it.

use std::marker::PhantomData;

/// Typed vertex buffer for per-instance data.
///
/// Grows 2x when a write exceeds capacity and never shrinks (GPU buffers
/// cannot be resized in place).
pub struct InstanceBuffer<T: bytemuck::Pod> {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> InstanceBuffer<T> {
    /// Buffer with room for `capacity` instances (at least one).
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: create(device, label, capacity * size_of::<T>()),
            capacity,
            len: 0,
            label,
            _marker: PhantomData,
        }
    }

    /// Replace the contents with `items`, reallocating if they do not fit.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        items: &[T],
    ) {
        if items.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, items.len());
            self.buffer =
                create(device, self.label, self.capacity * size_of::<T>());
            log::debug!("{} grown to {} instances", self.label, self.capacity);
        }
        if !items.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
        }
        self.len = items.len();
    }

    /// Slice covering the instances written last.
    #[must_use]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        let bytes = (self.len.max(1) * size_of::<T>()) as wgpu::BufferAddress;
        self.buffer.slice(..bytes)
    }

    /// Number of instances written last.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.len as u32
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn create(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Capacity after growing to hold `needed` items.
fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.saturating_mul(2).max(current.saturating_add(16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_at_least_doubles_the_request() {
        assert_eq!(grown_capacity(4, 10), 20);
        assert_eq!(grown_capacity(100, 101), 202);
    }

    #[test]
    fn growth_always_makes_room() {
        for current in [1, 7, 64] {
            for needed in [current + 1, current * 3] {
                assert!(grown_capacity(current, needed) >= needed);
            }
        }
    }
}
