//! 核心宏定义

/// 为配置结构体实现 Default trait
///
/// 使用示例:
/// ```rust
/// use spring_particles::impl_default;
///
/// struct Limits {
///     max_particles: usize,
///     label: String,
/// }
///
/// impl_default!(Limits {
///     max_particles: 100,
///     label: String::from("sparks"),
/// });
///
/// assert_eq!(Limits::default().max_particles, 100);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
