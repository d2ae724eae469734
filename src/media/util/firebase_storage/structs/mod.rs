pub mod storage_object_response;
