/// Runs `f` inside a validation error scope.
///
/// Returns the closure's value and the first validation error it raised, if
/// any. Without a scope wgpu routes such errors to the uncaptured-error
/// handler, which panics.
pub(crate) fn validated<T>(
    device: &wgpu::Device,
    f: impl FnOnce() -> T,
) -> (T, Option<wgpu::Error>) {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    let error = pollster::block_on(scope.pop());
    (value, error)
}
