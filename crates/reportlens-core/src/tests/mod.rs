mod model;
mod store;
mod upload;

use crate::ReportMetadata;
use serde_json::{Value, json};

/// Two pages; page 0 references `A, A, B` via query fields and `B` via a projection.
pub(crate) fn scenario_metadata_json() -> Value {
    json!({
        "theme": "CY24SU06",
        "version": "5.55",
        "pages": [
            {
                "page_number": 1,
                "page_name": "Overview",
                "visuals": [
                    {
                        "visual_number": 1,
                        "visual_type": "card",
                        "position": { "x": 10, "y": 20, "width": 100, "height": 50 },
                        "projections": {},
                        "query_fields": ["A"]
                    },
                    {
                        "visual_number": 2,
                        "visual_type": "card",
                        "position": { "x": 120, "y": 20, "width": 100, "height": 50 },
                        "projections": {},
                        "query_fields": ["A"]
                    },
                    {
                        "visual_number": 3,
                        "visual_type": "clusteredBarChart",
                        "position": { "x": 10, "y": 80, "width": 210, "height": 200 },
                        "projections": { "category": ["B"] },
                        "query_fields": ["B"]
                    }
                ]
            },
            {
                "page_number": 2,
                "page_name": "Details",
                "visuals": []
            }
        ],
        "suggestions": "Drop unused columns.",
        "optimal_layout": "```json\n{\"pages\":[{\"page_number\":1,\"page_name\":\"Overview\",\"visuals\":[{\"visual_number\":1,\"visual_type\":\"card\",\"position\":{\"x\":0,\"y\":0,\"width\":100,\"height\":50}}]},{\"visuals\":[]}]}\n```"
    })
}

pub(crate) fn scenario_metadata() -> ReportMetadata {
    serde_json::from_value(scenario_metadata_json()).unwrap()
}
