pub mod message;
pub mod report;

pub use message::{
    ConnectionStatus, ConnectionStatusData, MessageType, ReportUpdateData, SelectCityData,
    WebSocketMessage,
};
pub use report::{
    Cell, ReportData, ReportDescriptor, ReportId, ReportResult, ReportShape, ResultScalar,
    ResultSeries, ResultTable, SeriesPoint, format_thousands,
};
