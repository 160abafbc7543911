mod object_bucket_test;
mod remote_document_test;
