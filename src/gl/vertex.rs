use bytemuck::Pod;

/// A float vertex attribute inside of a `#[repr(C)]` vertex struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub offset: usize,
    pub num_elements: usize,
}

pub trait Vertex: Pod {
    fn attributes() -> Vec<Attribute>;
}

impl Attribute {
    pub fn glsl_type_name(&self) -> &'static str {
        match self.num_elements {
            1 => "float",
            2 => "vec2",
            3 => "vec3",
            4 => "vec4",
            n => panic!("unsupported attribute size {}", n),
        }
    }

    pub fn glsl_string(&self) -> String {
        format!("in {} {};\n", self.glsl_type_name(), self.name)
    }
}

/// Lists the attributes of a vertex struct in field order. Every field must
/// consist of `f32`s only.
#[macro_export]
macro_rules! attributes {
    ($vertex:ty => $($field:ident : $num_elements:expr),* $(,)?) => {{
        let mut offset = 0;
        let mut attributes = Vec::new();
        $(
            attributes.push($crate::gl::Attribute {
                name: concat!("a_", stringify!($field)),
                offset,
                num_elements: $num_elements,
            });
            #[allow(unused_assignments)]
            {
                offset += $num_elements * std::mem::size_of::<f32>();
            }
        )*
        assert_eq!(offset, std::mem::size_of::<$vertex>());
        attributes
    }};
}
