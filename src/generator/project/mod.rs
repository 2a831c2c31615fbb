mod generate;

pub use generate::{
    generate_backend, generate_backend_from, write_artifacts, GenerateOptions, GenerationReport,
    GenerationScope,
};
