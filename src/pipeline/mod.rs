mod descriptor;
mod executor;

pub use descriptor::RequestDescriptor;
pub use executor::RequestExecutor;
